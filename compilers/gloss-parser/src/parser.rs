use nom::{
    bytes::complete::{take_while, take_while1},
    multi::many0,
    sequence::preceded,
    IResult,
};

/// Characters that split words. Dashes and slashes join compounds we want apart.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '/'
}

/// Sentence punctuation and quotes, deleted in place so "don't" stays one word.
fn is_stripped(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}'
    )
}

fn separators(input: &str) -> IResult<&str, &str> {
    take_while(is_separator)(input)
}

fn chunk(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !is_separator(c))(input)
}

/// Splits a sentence into surface words, case preserved.
/// Chunks made only of punctuation disappear.
pub fn split_words(input: &str) -> Vec<String> {
    let chunks = match many0(preceded(separators, chunk))(input) {
        Ok((_, chunks)) => chunks,
        Err(_) => return Vec::new(),
    };

    chunks
        .into_iter()
        .map(|c| c.chars().filter(|ch| !is_stripped(*ch)).collect::<String>())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_and_quotes_are_deleted() {
        assert_eq!(split_words("Hello, how are you?"), ["Hello", "how", "are", "you"]);
        assert_eq!(split_words("I don't know."), ["I", "dont", "know"]);
        assert_eq!(split_words("\u{201C}quoted\u{201D} word"), ["quoted", "word"]);
    }

    #[test]
    fn test_dashes_and_slashes_split() {
        assert_eq!(split_words("t-shirt/dress"), ["t", "shirt", "dress"]);
    }

    #[test]
    fn test_whitespace_collapses_and_empty_chunks_vanish() {
        assert_eq!(split_words("  good \t morning  ... !  "), ["good", "morning"]);
        assert!(split_words("?!").is_empty());
        assert!(split_words("").is_empty());
    }
}
