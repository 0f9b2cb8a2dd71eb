//! Whitespace-run tokenization.
//!
//! A text run splits into alternating whitespace and word tokens. Both kinds
//! are kept so that cursors can account for every character, including
//! repeated spaces.

/// Whether a character separates words.
///
/// Unicode `White_Space` plus the ASCII information separators U+001C..U+001F.
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// One token of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Length in characters.
    pub len: usize,
    pub is_space: bool,
}

/// Iterator over the tokens of a text run. Never yields empty tokens.
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize a text run.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let space = is_space(first);

        let mut len = 0;
        let mut end = self.rest.len();
        for (offset, c) in self.rest.char_indices() {
            if is_space(c) != space {
                end = offset;
                break;
            }
            len += 1;
        }

        let (text, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token {
            text,
            len,
            is_space: space,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(s: &str) -> Vec<(&str, bool)> {
        tokenize(s).map(|t| (t.text, t.is_space)).collect()
    }

    #[test]
    fn test_words_and_runs() {
        assert_eq!(
            texts("one  two"),
            vec![("one", false), ("  ", true), ("two", false)]
        );
    }

    #[test]
    fn test_leading_and_trailing_space() {
        assert_eq!(
            texts("\n hi\t"),
            vec![("\n ", true), ("hi", false), ("\t", true)]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn test_lengths_count_characters() {
        let tokens: Vec<_> = tokenize("héllo\u{a0}wörld").collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].len, 5);
        assert!(tokens[1].is_space);
        assert_eq!(tokens[1].len, 1);
        assert_eq!(tokens[2].len, 5);
    }

    #[test]
    fn test_information_separators_are_space() {
        assert!(is_space('\u{1f}'));
        assert!(!is_space('\u{1}'));
        assert_eq!(texts("a\u{1e}b").len(), 3);
    }
}
