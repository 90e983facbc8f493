use anyhow::{anyhow, Context};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use gloss_protocol::Lexicon;
use rkyv::ser::{serializers::AllocSerializer, Serializer};

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON lexicon to an rkyv binary")]
struct Cli {
    /// JSON lexicon. The built-in ISL lexicon is used when omitted.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Also write the compiled lexicon as JSON (an authoring template)
    #[arg(long, value_name = "FILE")]
    dump_json: Option<PathBuf>,
}

fn compile(lexicon: &Lexicon) -> anyhow::Result<Vec<u8>> {
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(lexicon)
        .map_err(|e| anyhow!("rkyv serialization failed: {:?}", e))?;
    Ok(serializer.into_serializer().into_inner().to_vec())
}

/// Alias groups whose canonical form is not in the vocabulary.
fn dangling_references(lexicon: &Lexicon) -> Vec<String> {
    let vocabulary: HashSet<&str> = lexicon.vocabulary().collect();
    lexicon
        .aliases
        .iter()
        .map(|g| g.canonical.as_str())
        .filter(|c| !vocabulary.contains(c))
        .map(|c| format!("alias group '{}'", c))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 1. Load the lexicon
    let lexicon = match &cli.input {
        Some(path) => {
            println!("📖 Reading JSON from {:?}...", path);
            let input_data = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<Lexicon>(&input_data)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => {
            println!("📖 Using the built-in ISL lexicon...");
            Lexicon::isl()
        }
    };

    println!(
        "⚙️  Compiling lexicon version {} with {} glosses, {} alias groups...",
        lexicon.version,
        lexicon.glosses.len(),
        lexicon.aliases.len()
    );
    for problem in dangling_references(&lexicon) {
        println!("⚠️  {} is not in the vocabulary and will be ignored", problem);
    }

    // 2. Serialize to RKYV and check it loads back
    let bytes = compile(&lexicon)?;
    Lexicon::from_archive(&bytes).context("compiled archive is invalid")?;

    // 3. Write Binary
    fs::write(&cli.output, &bytes)?;
    println!("✅ Success! {} bytes written to {:?}", bytes.len(), cli.output);

    if let Some(path) = &cli.dump_json {
        fs::write(path, serde_json::to_string_pretty(&lexicon)?)?;
        println!("📝 JSON written to {:?}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloss_protocol::AliasGroup;

    #[test]
    fn test_compiled_archive_loads() {
        let lexicon = Lexicon::isl();
        let bytes = compile(&lexicon).unwrap();
        assert_eq!(Lexicon::from_archive(&bytes).unwrap(), lexicon);
    }

    #[test]
    fn test_dangling_alias_groups_are_reported() {
        let mut lexicon = Lexicon::isl();
        assert!(dangling_references(&lexicon).is_empty());
        lexicon.aliases.push(AliasGroup {
            canonical: "kitchen".to_string(),
            variants: vec!["galley".to_string()],
        });
        assert_eq!(dangling_references(&lexicon), ["alias group 'kitchen'"]);
    }
}
