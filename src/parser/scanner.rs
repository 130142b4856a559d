//! Recursive-descent recogniser for placeholder tokens
//!
//! Grammar over the lexer's token stream:
//!
//! ```text
//! placeholder := "{" KIND ":" "{" NAME "}" "}"
//!              | "{" KIND ":" "{" WORD "}" ":" "{" WORD "}" "}"
//! KIND        := "app" | "deferred" | "svg"
//! ```
//!
//! `NAME` may contain dashes, `WORD` may not. Anything that does not form a
//! placeholder is literal text.

use super::ast::{Kind, Placeholder, Segment, Span};
use super::lexer::{is_word, lex, Token};

struct Scanner<'a> {
    input: &'a str,
    tokens: Vec<(Token, Span)>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            tokens: lex(input).collect(),
        }
    }

    fn text(&self, span: &Span) -> &'a str {
        &self.input[span.clone()]
    }

    fn expect(&self, pos: usize, expected: Token) -> Option<usize> {
        match self.tokens.get(pos) {
            Some((tok, _)) if *tok == expected => Some(pos + 1),
            _ => None,
        }
    }

    fn name(&self, pos: usize) -> Option<(&'a str, usize)> {
        match self.tokens.get(pos) {
            Some((Token::Name, span)) => Some((self.text(span), pos + 1)),
            _ => None,
        }
    }

    /// `"{" NAME "}"`
    fn braced_name(&self, pos: usize) -> Option<(&'a str, usize)> {
        let pos = self.expect(pos, Token::BraceOpen)?;
        let (name, pos) = self.name(pos)?;
        let pos = self.expect(pos, Token::BraceClose)?;
        Some((name, pos))
    }

    /// Try to recognise a placeholder starting at token `start`.
    ///
    /// Returns the placeholder and the index of the first token after it.
    fn placeholder(&self, start: usize) -> Option<(Placeholder, usize)> {
        let pos = self.expect(start, Token::BraceOpen)?;
        let (kind, pos) = self.name(pos)?;
        let kind: Kind = kind.parse().ok()?;
        let pos = self.expect(pos, Token::Colon)?;
        let (category, pos) = self.braced_name(pos)?;

        if let Some(end) = self.expect(pos, Token::BraceClose) {
            return Some((Placeholder::new(kind, category), end));
        }

        let pos = self.expect(pos, Token::Colon)?;
        let (name, pos) = self.braced_name(pos)?;
        let end = self.expect(pos, Token::BraceClose)?;
        if !is_word(category) || !is_word(name) {
            return None;
        }
        Some((Placeholder::new(kind, category).with_name(name), end))
    }

    fn scan(self) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut text_start: Option<usize> = None;
        let mut i = 0;

        while i < self.tokens.len() {
            let start = self.tokens[i].1.start;
            match self.placeholder(i) {
                Some((placeholder, next)) => {
                    if let Some(ts) = text_start.take() {
                        segments.push(Segment::Text(&self.input[ts..start]));
                    }
                    let span = start..self.tokens[next - 1].1.end;
                    segments.push(Segment::Placeholder {
                        placeholder,
                        raw: &self.input[span.clone()],
                        span,
                    });
                    i = next;
                }
                None => {
                    text_start.get_or_insert(start);
                    i += 1;
                }
            }
        }

        if let Some(ts) = text_start {
            segments.push(Segment::Text(&self.input[ts..]));
        }
        segments
    }
}

/// Split input into literal text and placeholder segments, left to right.
pub fn scan(input: &str) -> Vec<Segment<'_>> {
    Scanner::new(input).scan()
}

/// All placeholders in the input with their spans, in order of appearance.
pub fn placeholders(input: &str) -> Vec<(Placeholder, Span)> {
    scan(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder {
                placeholder, span, ..
            } => Some((placeholder, span)),
            Segment::Text(_) => None,
        })
        .collect()
}
