mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use gloss_player::{
    FsClipStore, Player, PlayerConfig, RunOutcome, TickState, TimedFingerspeller,
};
use gloss_protocol::Lexicon;
use gloss_solver::{Conversion, EngineConfig, Translator};
use tracing_subscriber::prelude::*;

use crate::console::{ConsoleLetters, ConsoleRenderer, ConsoleStatus};

#[derive(Parser)]
#[command(author, version, about = "English to ISL gloss translation and playback")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the gloss sequence for a sentence
    Translate {
        sentence: String,
        /// Print the full conversion (tokens, fallbacks, glosses) as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Translate a sentence and play its clips
    Play {
        sentence: String,
        #[command(flatten)]
        playback: PlaybackArgs,
        /// Restart from the first word until interrupted
        #[arg(long = "loop")]
        looping: bool,
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Play the clip of a single word
    Word {
        word: String,
        #[command(flatten)]
        playback: PlaybackArgs,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Compiled lexicon archive (built-in ISL lexicon when omitted)
    #[arg(long, value_name = "FILE")]
    lexicon: Option<PathBuf>,
    /// Leave unresolved words out instead of fingerspelling them
    #[arg(long)]
    no_fingerspell: bool,
    #[arg(long, value_name = "SCORE")]
    min_similarity: Option<f32>,
}

#[derive(Args)]
struct PlaybackArgs {
    /// Directory of `<clip>_canonical_median.json` files
    #[arg(long, value_name = "DIR")]
    clips: PathBuf,
    /// Treat clip loads slower than this as missing
    #[arg(long, value_name = "MS")]
    fetch_timeout_ms: Option<u64>,
}

impl EngineArgs {
    fn lexicon(&self) -> anyhow::Result<Lexicon> {
        match &self.lexicon {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Ok(Lexicon::from_archive(&bytes)?)
            }
            None => Ok(Lexicon::isl()),
        }
    }

    /// Environment first, flags override.
    fn config(&self) -> EngineConfig {
        let mut config = EngineConfig::from_env();
        if self.no_fingerspell {
            config.fingerspelling_enabled = false;
        }
        if let Some(min) = self.min_similarity {
            config.min_similarity = min;
        }
        config
    }
}

fn player(lexicon: &Lexicon, args: &PlaybackArgs, fingerspelling_enabled: bool) -> Player {
    let config = PlayerConfig {
        fingerspelling_enabled,
        fetch_timeout: args.fetch_timeout_ms.map(Duration::from_millis),
        ..PlayerConfig::default()
    };
    Player::new(
        Arc::new(FsClipStore::new(&args.clips, lexicon)),
        Arc::new(ConsoleRenderer),
        Arc::new(TimedFingerspeller::new(ConsoleLetters)),
        Arc::new(ConsoleStatus),
        config,
    )
}

fn print_conversion(conversion: &Conversion, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(conversion)?);
        return Ok(());
    }
    println!("{}", conversion.glosses.join(" "));
    for fallback in &conversion.semantic_applied {
        eprintln!(
            "≈ {} -> {} ({:.2})",
            fallback.original, fallback.canonical, fallback.score
        );
    }
    let unmatched = conversion.unmatched_words();
    if !unmatched.is_empty() {
        eprintln!("⚠ Words not in dataset: {}", unmatched.join(", "));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Cli::parse().command {
        Command::Translate { sentence, json, engine } => {
            let translator = Translator::new(engine.lexicon()?, &engine.config());
            let conversion = translator.translate(&sentence).await;
            print_conversion(&conversion, json)?;
        }
        Command::Play {
            sentence,
            playback,
            looping,
            engine,
        } => {
            let config = engine.config();
            let lexicon = engine.lexicon()?;
            let player = player(&lexicon, &playback, config.fingerspelling_enabled);
            let translator = Translator::new(lexicon, &config);

            let conversion = translator.translate(&sentence).await;
            print_conversion(&conversion, false)?;
            let Some(run) = player.start_sentence(conversion.glosses, looping) else {
                eprintln!("nothing to play");
                return Ok(());
            };

            tokio::select! {
                outcome = run.run() => {
                    if outcome == RunOutcome::Cancelled {
                        tracing::warn!("Playback ended early");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    player.stop();
                }
            }
        }
        Command::Word { word, playback } => {
            let player = player(&Lexicon::isl(), &playback, false);
            let mut word_playback = player.load_word(&word).await?;
            tokio::select! {
                state = word_playback.run() => {
                    if state != TickState::Finished {
                        tracing::warn!("Playback ended early");
                    }
                }
                _ = tokio::signal::ctrl_c() => {}
            }
        }
    }
    Ok(())
}
