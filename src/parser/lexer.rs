//! Lexer for placeholder scanning using logos
//!
//! Every byte of the input belongs to exactly one token, so the spans of the
//! token stream can always be stitched back into the original text.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(":")]
    Colon,

    /// Run of word characters and dashes (`[A-Za-z0-9_-]+`)
    #[regex(r"[A-Za-z0-9_\-]+")]
    Name,

    /// Anything that cannot take part in a placeholder
    #[regex(r"[^{}:A-Za-z0-9_\-]+")]
    Text,
}

/// Lex the input into tokens with their spans.
///
/// Bytes logos fails to classify are reported as [`Token::Text`] so that no
/// input is ever dropped.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Text), span))
}

/// True if the slice consists only of word characters (`[A-Za-z0-9_]`).
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
