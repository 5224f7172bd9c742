use std::fmt;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    DefKeyword,
    EndKeyword,
    Identifier,
    Integer,
    OpenParen,
    CloseParen,
    Comma,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' token with value '{}'", self.kind, self.value)
    }
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum LexerError {
    #[error("Token not recognized at '{0}'.")]
    Unrecognized(String),
}

// group order is match precedence
const GROUPS: [(&str, TokenKind); 7] = [
    ("def", TokenKind::DefKeyword),
    ("end", TokenKind::EndKeyword),
    ("ident", TokenKind::Identifier),
    ("integer", TokenKind::Integer),
    ("oppar", TokenKind::OpenParen),
    ("clpar", TokenKind::CloseParen),
    ("comma", TokenKind::Comma),
];

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(&format!(
        "^(?:{})",
        [
            r"(?P<def>def(?-u:\b))",
            r"(?P<end>end(?-u:\b))",
            r"(?P<ident>[a-zA-Z]+(?-u:\b))",
            r"(?P<integer>[0-9]+(?-u:\b))",
            r"(?P<oppar>\()",
            r"(?P<clpar>\))",
            r"(?P<comma>,)",
        ]
        .join("|")
    ))
    .unwrap();
    static ref IDENT_RE: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
}

/// Whether `name` could have been produced as an `Identifier` token.
pub fn is_identifier(name: &str) -> bool {
    IDENT_RE.is_match(name) && name != "def" && name != "end"
}

fn leading_token(input: &str) -> Result<Token, LexerError> {
    let cap = TOKEN_RE
        .captures(input)
        .ok_or_else(|| LexerError::Unrecognized(input.to_string()))?;

    GROUPS
        .iter()
        .find_map(|&(group, kind)| cap.name(group).map(|m| Token::new(kind, m.as_str())))
        .ok_or_else(|| LexerError::Unrecognized(input.to_string()))
}

/// lex the given input string into tokens, in source order. Whitespace is
/// only skipped between tokens, never before the first one.
pub fn lex(input: &str) -> Result<Vec<Token>, LexerError> {
    let mut rest = input;

    let mut res = Vec::new();
    while !rest.is_empty() {
        let token = leading_token(rest)?;
        trace!("lexed {}", token);

        rest = rest[token.value.len()..].trim();
        res.push(token);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lex_empty() {
        assert!(lex("").unwrap().is_empty());
    }

    #[test]
    fn leading_whitespace_is_not_skipped() {
        assert_eq!(
            lex("  \n\t "),
            Err(LexerError::Unrecognized("  \n\t ".to_string()))
        );
        assert_eq!(
            lex("  def f() end").unwrap_err().to_string(),
            "Token not recognized at '  def f() end'."
        );
    }

    #[test]
    fn trailing_whitespace_is_skipped() {
        assert_eq!(lex("def f() end \n").unwrap().len(), 5);
    }

    #[test]
    fn lex_works() {
        let input = "def f(a, b) g(a, 12) end";
        let tokenized = vec![
            Token::new(TokenKind::DefKeyword, "def"),
            Token::new(TokenKind::Identifier, "f"),
            Token::new(TokenKind::OpenParen, "("),
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Comma, ","),
            Token::new(TokenKind::Identifier, "b"),
            Token::new(TokenKind::CloseParen, ")"),
            Token::new(TokenKind::Identifier, "g"),
            Token::new(TokenKind::OpenParen, "("),
            Token::new(TokenKind::Identifier, "a"),
            Token::new(TokenKind::Comma, ","),
            Token::new(TokenKind::Integer, "12"),
            Token::new(TokenKind::CloseParen, ")"),
            Token::new(TokenKind::EndKeyword, "end"),
        ];
        assert_eq!(lex(input).unwrap(), tokenized);
    }

    #[test]
    fn keywords_need_word_boundary() {
        assert_eq!(
            lex("definition ending").unwrap(),
            vec![
                Token::new(TokenKind::Identifier, "definition"),
                Token::new(TokenKind::Identifier, "ending"),
            ]
        );
        assert_eq!(
            lex("def(end)").unwrap(),
            vec![
                Token::new(TokenKind::DefKeyword, "def"),
                Token::new(TokenKind::OpenParen, "("),
                Token::new(TokenKind::EndKeyword, "end"),
                Token::new(TokenKind::CloseParen, ")"),
            ]
        );
    }

    #[test]
    fn lex_multiline() {
        let tokens = lex("def main()\n  log(1)\nend\n").unwrap();
        assert_eq!(tokens.len(), 8);
        assert_eq!(tokens[7], Token::new(TokenKind::EndKeyword, "end"));
    }

    #[test]
    fn invalid_leading_character() {
        assert_eq!(
            lex("@ def f() end"),
            Err(LexerError::Unrecognized("@ def f() end".to_string()))
        );
        assert_eq!(
            lex("@ def f() end").unwrap_err().to_string(),
            "Token not recognized at '@ def f() end'."
        );
    }

    #[test]
    fn invalid_inner_character() {
        assert_eq!(
            lex("def f() @ end").unwrap_err().to_string(),
            "Token not recognized at '@ end'."
        );
    }

    #[test]
    fn letters_and_digits_do_not_touch() {
        assert_eq!(
            lex("abc1").unwrap_err(),
            LexerError::Unrecognized("abc1".to_string())
        );
        assert_eq!(
            lex("1abc").unwrap_err(),
            LexerError::Unrecognized("1abc".to_string())
        );
    }

    #[test]
    fn word_boundary_is_ascii() {
        assert_eq!(
            lex("abc\u{e9}"),
            Err(LexerError::Unrecognized("\u{e9}".to_string()))
        );
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("foo"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("f1"));
        assert!(!is_identifier("end"));
    }
}
