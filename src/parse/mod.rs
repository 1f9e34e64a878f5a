//! Parsing of the canonical partition string format.
//!
//! The grammar is the one produced by the `Display` implementations of
//! the partition types: the whole partition between square brackets,
//! subsets between square brackets, elements and subsets separated by
//! commas. Whitespace between tokens is ignored; element tokens are
//! maximal runs free of whitespace, brackets and commas, and are handed
//! to a caller-supplied deserializer. `[]` is the empty partition, but an
//! empty subset inside a partition is malformed, as are duplicate
//! elements anywhere in the input.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::ops::Range;

use logos::Logos;
use miette::SourceSpan;

pub mod error;


pub use self::error::{ParseError, ParseResult};

#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum Token<'s> {
    #[token("[")]
    Open,
    #[token("]")]
    Close,
    #[token(",")]
    Comma,
    #[regex(r"[^\[\], \t\n\r\f]+")]
    Element(&'s str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "["),
            Token::Close => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Element(text) => write!(f, "{text}"),
        }
    }
}

fn span(range: &Range<usize>) -> SourceSpan {
    (range.start, range.end - range.start).into()
}

struct Cursor<'t, 's> {
    tokens: &'t [(Token<'s>, Range<usize>)],
    pos: usize,
}

impl<'t, 's> Cursor<'t, 's> {
    fn peek(&self) -> Option<&'t (Token<'s>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t (Token<'s>, Range<usize>)> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn next_or_end(&mut self) -> ParseResult<&'t (Token<'s>, Range<usize>)> {
        self.bump().ok_or(ParseError::UnexpectedEnd)
    }

    fn expect_open(&mut self, expected: &'static str) -> ParseResult<()> {
        match self.next_or_end()? {
            (Token::Open, _) => Ok(()),
            (tok, range) => Err(ParseError::Unexpected {
                expected,
                found: tok.to_string(),
                span: span(range),
            }),
        }
    }
}

/// Parses the canonical form into subsets, deserializing every element
/// token with `de`. Used by the `from_str_with` constructors of both
/// partition types.
pub(crate) fn parse_blocks<T, F, E>(input: &str, mut de: F) -> ParseResult<Vec<HashSet<T>>>
where
    T: Clone + Eq + Hash,
    F: FnMut(&str) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut tokens = Vec::new();
    for (tok, range) in Token::lexer(input).spanned() {
        match tok {
            Ok(tok) => tokens.push((tok, range)),
            Err(()) => {
                return Err(ParseError::UnrecognizedToken { span: span(&range) });
            }
        }
    }
    let mut cursor = Cursor {
        tokens: &tokens,
        pos: 0,
    };

    cursor.expect_open("the opening `[` of a partition")?;

    let mut blocks = Vec::new();
    let mut seen: HashSet<T> = HashSet::new();
    if let Some((Token::Close, _)) = cursor.peek() {
        cursor.bump();
    } else {
        loop {
            blocks.push(parse_block(&mut cursor, &mut de, &mut seen)?);
            match cursor.next_or_end()? {
                (Token::Comma, _) => continue,
                (Token::Close, _) => break,
                (tok, range) => {
                    return Err(ParseError::Unexpected {
                        expected: "`,` or `]`",
                        found: tok.to_string(),
                        span: span(range),
                    });
                }
            }
        }
    }

    if let Some((_, range)) = cursor.peek() {
        return Err(ParseError::Trailing { span: span(range) });
    }
    Ok(blocks)
}

fn parse_block<'s, T, F, E>(
    cursor: &mut Cursor<'_, 's>,
    de: &mut F,
    seen: &mut HashSet<T>,
) -> ParseResult<HashSet<T>>
where
    T: Clone + Eq + Hash,
    F: FnMut(&str) -> Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    cursor.expect_open("the opening `[` of a subset")?;
    if let Some((Token::Close, range)) = cursor.peek() {
        return Err(ParseError::EmptySubset { span: span(range) });
    }

    let mut block = HashSet::new();
    loop {
        let value = match cursor.next_or_end()? {
            (Token::Element(text), range) => {
                let value = de(*text).map_err(|e| ParseError::Deserialize {
                    span: span(range),
                    source: Box::new(e),
                })?;
                if !seen.insert(value.clone()) {
                    return Err(ParseError::DuplicateElement {
                        element: text.to_string(),
                        span: span(range),
                    });
                }
                value
            }
            (tok, range) => {
                return Err(ParseError::Unexpected {
                    expected: "an element",
                    found: tok.to_string(),
                    span: span(range),
                });
            }
        };
        block.insert(value);

        match cursor.next_or_end()? {
            (Token::Comma, _) => continue,
            (Token::Close, _) => break,
            (tok, range) => {
                return Err(ParseError::Unexpected {
                    expected: "`,` or `]`",
                    found: tok.to_string(),
                    span: span(range),
                });
            }
        }
    }
    Ok(block)
}
