//! Word tokenizer shared by the rule-based recognizer and the skill matcher.
//!
//! Splits on whitespace and structural punctuation, then trims sentence
//! punctuation from token edges. `+` and `#` stay attached so that `c++` and
//! `c#` survive; inner dots survive so that `node.js` stays one token. A hyphen
//! between two letters or digits splits, so `Python-based` yields `Python`.

/// A token with its byte span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            ',' | ';' | ':' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '/' | '\\' | '|' | '!'
                | '?' | '<' | '>' | '•' | '·' | '–' | '—' | '*' | '=' | '“' | '”'
        )
}

fn is_edge_punct(c: char) -> bool {
    matches!(c, '.' | '\'' | '-' | '_' | '‘' | '’' | '`' | '~')
}

/// Tokenize text into words with byte offsets, in document order.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let split = is_separator(c) || is_inner_hyphen(prev, c, next);
        prev = Some(c);
        if split {
            if let Some(s) = start.take() {
                push_trimmed(text, s, i, &mut tokens);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        push_trimmed(text, s, text.len(), &mut tokens);
    }
    tokens
}

fn is_inner_hyphen(prev: Option<char>, c: char, next: Option<char>) -> bool {
    c == '-'
        && prev.is_some_and(char::is_alphanumeric)
        && next.is_some_and(char::is_alphanumeric)
}

fn push_trimmed<'a>(text: &'a str, start: usize, end: usize, out: &mut Vec<Token<'a>>) {
    let raw = &text[start..end];
    let trimmed_front = raw.trim_start_matches(is_edge_punct);
    let trimmed = trimmed_front.trim_end_matches(is_edge_punct);
    if trimmed.is_empty() {
        return;
    }
    let offset = start + (raw.len() - trimmed_front.len());
    out.push(Token {
        text: trimmed,
        start: offset,
        end: offset + trimmed.len(),
    });
}

/// Convenience: just the token strings.
pub fn words(text: &str) -> Vec<&str> {
    tokenize(text).into_iter().map(|t| t.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_technical_tokens() {
        let w = words("Skills: Python, C++, C#, node.js. (Docker)");
        assert_eq!(w, vec!["Skills", "Python", "C++", "C#", "node.js", "Docker"]);
    }

    #[test]
    fn test_offsets_point_into_source() {
        let text = "  Jane Smith,\nBerlin.";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
        assert_eq!(words(text), vec!["Jane", "Smith", "Berlin"]);
    }

    #[test]
    fn test_inner_hyphen_splits_words() {
        assert_eq!(
            words("Python-based, Docker-Compose and 2019-2021"),
            vec!["Python", "based", "Docker", "Compose", "and", "2019", "2021"]
        );
        assert_eq!(words("-flag- --x"), vec!["flag", "x"]);
    }

    #[test]
    fn test_punctuation_only_input() {
        assert!(tokenize("... -- ,,, ()").is_empty());
        assert!(tokenize("").is_empty());
    }
}
