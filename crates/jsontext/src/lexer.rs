//! The character-driven finite-state lexer.
//!
//! [`Lexer`] pulls characters from a [`CharSource`] and recognizes one JSON
//! lexeme per [`next_token`](Lexer::next_token) call: structural characters,
//! numbers, keywords, and string delimiters/bodies with full escape
//! processing. Two input extensions are supported behind flags: `//` and
//! `/* */` comments, and single-quoted strings (whose delimiters are
//! normalized to `"` tokens so downstream consumers never see the
//! difference).
//!
//! The lexer keeps a one-character lookahead slot. A state that reads ahead
//! to find the end of a lexeme (numbers, most prominently) leaves the
//! terminating character in that slot for the next call.
//!
//! # Examples
//!
//! ```
//! use jsontext::{Lexer, StringSource, TokenKind};
//!
//! let mut lexer = Lexer::new(StringSource::new("[12, true]"));
//! assert!(lexer.next_token().unwrap());
//! assert_eq!(lexer.token(), Some(TokenKind::Char('[')));
//! assert!(lexer.next_token().unwrap());
//! assert_eq!(lexer.token(), Some(TokenKind::Number));
//! assert_eq!(lexer.string_value(), "12");
//! ```

use alloc::string::String;

use crate::{
    error::JsonError,
    escape_buffer::UnicodeEscapeBuffer,
    keyword::{Keyword, KeywordMatcher, KeywordStep},
    source::CharSource,
};

/// The kind of lexeme published by [`Lexer::next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A structural character: one of `{` `}` `[` `]` `,` `:`, or a string
    /// delimiter reported as `"` regardless of the quote style in the input.
    Char(char),
    /// A numeric literal; its text is in [`Lexer::string_value`].
    Number,
    /// The unescaped body of a string literal, in
    /// [`Lexer::string_value`]. Emitted between the two delimiter tokens,
    /// and possibly empty.
    Chars,
    /// The keyword `true`.
    True,
    /// The keyword `false`.
    False,
    /// The keyword `null`.
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Dispatch,
    NumberSign,
    NumberZero,
    NumberInt,
    NumberFracStart,
    NumberFrac,
    NumberExpStart,
    NumberExpSign,
    NumberExp,
    KeywordTail,
    DoubleString,
    DoubleStringEnd,
    SingleString,
    SingleStringEnd,
    Escape,
    EscapeUnicode,
    CommentStart,
    LineComment,
    BlockComment,
    BlockCommentStar,
}

/// JSON whitespace: space plus the `\t`..`\r` control range.
fn is_json_whitespace(ch: char) -> bool {
    ch == ' ' || ('\t'..='\r').contains(&ch)
}

/// A streaming lexer over a character source.
///
/// Call [`next_token`](Lexer::next_token) until it returns `Ok(false)`; after
/// each `Ok(true)` the recognized [`TokenKind`] is available from
/// [`token`](Lexer::token) and the accumulated lexeme text from
/// [`string_value`](Lexer::string_value).
#[derive(Debug)]
pub struct Lexer<S> {
    source: S,
    /// One-character lookahead; holds a character read past the end of the
    /// previous lexeme.
    pending: Option<char>,
    state: LexState,
    /// Accumulates string bodies, number lexemes, and keyword text.
    buffer: String,
    string_value: String,
    token: Option<TokenKind>,
    unicode: UnicodeEscapeBuffer,
    keyword: KeywordMatcher,
    /// String state to resume after an escape sequence completes.
    string_return: LexState,
    end_of_input: bool,
    line: usize,
    column: usize,
    /// Recognize `//` and `/* */` comments.
    pub allow_comments: bool,
    /// Recognize single-quoted strings.
    pub allow_single_quoted_strings: bool,
}

impl<S: CharSource> Lexer<S> {
    /// Creates a lexer over `source` with both input extensions enabled.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
            state: LexState::Dispatch,
            buffer: String::new(),
            string_value: String::new(),
            token: None,
            unicode: UnicodeEscapeBuffer::default(),
            keyword: KeywordMatcher::default(),
            string_return: LexState::DoubleString,
            end_of_input: false,
            line: 1,
            column: 1,
            allow_comments: true,
            allow_single_quoted_strings: true,
        }
    }

    /// The kind of the most recently recognized token.
    pub fn token(&self) -> Option<TokenKind> {
        self.token
    }

    /// The text of the most recently recognized token.
    ///
    /// Holds the unescaped body for [`TokenKind::Chars`], the lexeme for
    /// [`TokenKind::Number`] and the keywords, and is empty for structural
    /// characters.
    pub fn string_value(&self) -> &str {
        &self.string_value
    }

    /// Whether the source has been exhausted.
    pub fn end_of_input(&self) -> bool {
        self.end_of_input
    }

    /// 1-based line of the next unconsumed character.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the next unconsumed character.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Advances to the next token.
    ///
    /// Returns `Ok(true)` when a token was recognized and published,
    /// `Ok(false)` at end of input, and an error on malformed input. End of
    /// input in the middle of a string, number head, keyword, or block
    /// comment is a lexical error.
    pub fn next_token(&mut self) -> Result<bool, JsonError> {
        self.token = None;
        loop {
            if let Some(kind) = self.step()? {
                self.string_value.clear();
                core::mem::swap(&mut self.string_value, &mut self.buffer);
                self.token = Some(kind);
                return Ok(true);
            }
            if self.end_of_input {
                return Ok(false);
            }
        }
    }

    fn peek(&mut self) -> Option<char> {
        if self.pending.is_none() {
            self.pending = self.source.read();
        }
        self.pending
    }

    fn bump(&mut self) {
        if let Some(ch) = self.pending.take() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn consume_into_buffer(&mut self, ch: char) {
        self.bump();
        self.buffer.push(ch);
    }

    fn invalid_char(&self, ch: char) -> JsonError {
        JsonError::InvalidCharacter {
            ch,
            line: self.line,
            column: self.column,
        }
    }

    fn unexpected_end(&self) -> JsonError {
        JsonError::UnexpectedEndOfInput {
            line: self.line,
            column: self.column,
        }
    }

    /// Runs one step of the state machine against the lookahead character.
    ///
    /// Returns `Ok(Some(kind))` when a token is complete. States that end a
    /// lexeme on lookahead leave the terminating character unconsumed.
    #[allow(clippy::too_many_lines)]
    fn step(&mut self) -> Result<Option<TokenKind>, JsonError> {
        use LexState::*;

        let next = self.peek();
        match self.state {
            Dispatch => match next {
                None => {
                    self.end_of_input = true;
                    Ok(None)
                }
                Some(c) if is_json_whitespace(c) => {
                    self.bump();
                    Ok(None)
                }
                Some(c @ ('{' | '}' | '[' | ']' | ',' | ':')) => {
                    self.bump();
                    Ok(Some(TokenKind::Char(c)))
                }
                Some('"') => {
                    self.bump();
                    self.buffer.clear();
                    self.state = DoubleString;
                    self.string_return = DoubleString;
                    Ok(Some(TokenKind::Char('"')))
                }
                Some('\'') if self.allow_single_quoted_strings => {
                    self.bump();
                    self.buffer.clear();
                    self.state = SingleString;
                    self.string_return = SingleString;
                    // Delimiters are normalized; consumers only ever see `"`.
                    Ok(Some(TokenKind::Char('"')))
                }
                Some('/') if self.allow_comments => {
                    self.bump();
                    self.state = CommentStart;
                    Ok(None)
                }
                Some(c @ '-') => {
                    self.buffer.clear();
                    self.consume_into_buffer(c);
                    self.state = NumberSign;
                    Ok(None)
                }
                Some(c @ '0') => {
                    self.buffer.clear();
                    self.consume_into_buffer(c);
                    self.state = NumberZero;
                    Ok(None)
                }
                Some(c) if c.is_ascii_digit() => {
                    self.buffer.clear();
                    self.consume_into_buffer(c);
                    self.state = NumberInt;
                    Ok(None)
                }
                Some(c @ ('t' | 'f' | 'n')) => {
                    self.buffer.clear();
                    self.consume_into_buffer(c);
                    self.keyword = KeywordMatcher::after(c);
                    self.state = KeywordTail;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
            },

            NumberSign => match next {
                Some(c @ '0') => {
                    self.consume_into_buffer(c);
                    self.state = NumberZero;
                    Ok(None)
                }
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    self.state = NumberInt;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
                None => Err(self.unexpected_end()),
            },

            NumberZero => match next {
                Some(c @ '.') => {
                    self.consume_into_buffer(c);
                    self.state = NumberFracStart;
                    Ok(None)
                }
                Some(c @ ('e' | 'E')) => {
                    self.consume_into_buffer(c);
                    self.state = NumberExpStart;
                    Ok(None)
                }
                _ => {
                    self.state = Dispatch;
                    Ok(Some(TokenKind::Number))
                }
            },

            NumberInt => match next {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    Ok(None)
                }
                Some(c @ '.') => {
                    self.consume_into_buffer(c);
                    self.state = NumberFracStart;
                    Ok(None)
                }
                Some(c @ ('e' | 'E')) => {
                    self.consume_into_buffer(c);
                    self.state = NumberExpStart;
                    Ok(None)
                }
                _ => {
                    self.state = Dispatch;
                    Ok(Some(TokenKind::Number))
                }
            },

            NumberFracStart => match next {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    self.state = NumberFrac;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
                None => Err(self.unexpected_end()),
            },

            NumberFrac => match next {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    Ok(None)
                }
                Some(c @ ('e' | 'E')) => {
                    self.consume_into_buffer(c);
                    self.state = NumberExpStart;
                    Ok(None)
                }
                _ => {
                    self.state = Dispatch;
                    Ok(Some(TokenKind::Number))
                }
            },

            NumberExpStart => match next {
                Some(c @ ('+' | '-')) => {
                    self.consume_into_buffer(c);
                    self.state = NumberExpSign;
                    Ok(None)
                }
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    self.state = NumberExp;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
                None => Err(self.unexpected_end()),
            },

            NumberExpSign => match next {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    self.state = NumberExp;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
                None => Err(self.unexpected_end()),
            },

            NumberExp => match next {
                Some(c) if c.is_ascii_digit() => {
                    self.consume_into_buffer(c);
                    Ok(None)
                }
                _ => {
                    self.state = Dispatch;
                    Ok(Some(TokenKind::Number))
                }
            },

            KeywordTail => match next {
                None => Err(self.unexpected_end()),
                Some(c) => match self.keyword.step(c) {
                    KeywordStep::More => {
                        self.consume_into_buffer(c);
                        Ok(None)
                    }
                    KeywordStep::Done(kw) => {
                        self.consume_into_buffer(c);
                        self.state = Dispatch;
                        Ok(Some(match kw {
                            Keyword::True => TokenKind::True,
                            Keyword::False => TokenKind::False,
                            Keyword::Null => TokenKind::Null,
                        }))
                    }
                    KeywordStep::Mismatch => Err(self.invalid_char(c)),
                },
            },

            DoubleString => match next {
                None => Err(self.unexpected_end()),
                Some('"') => {
                    self.bump();
                    self.state = DoubleStringEnd;
                    Ok(Some(TokenKind::Chars))
                }
                Some('\\') => {
                    self.bump();
                    self.state = Escape;
                    Ok(None)
                }
                Some(c) => {
                    self.consume_into_buffer(c);
                    Ok(None)
                }
            },

            // The closing delimiter was already consumed; report it as its
            // own token without touching the input.
            DoubleStringEnd | SingleStringEnd => {
                self.state = Dispatch;
                Ok(Some(TokenKind::Char('"')))
            }

            SingleString => match next {
                None => Err(self.unexpected_end()),
                Some('\'') => {
                    self.bump();
                    self.state = SingleStringEnd;
                    Ok(Some(TokenKind::Chars))
                }
                Some('\\') => {
                    self.bump();
                    self.state = Escape;
                    Ok(None)
                }
                Some(c) => {
                    self.consume_into_buffer(c);
                    Ok(None)
                }
            },

            Escape => match next {
                None => Err(self.unexpected_end()),
                Some(c) => {
                    self.bump();
                    let unescaped = match c {
                        '"' | '\\' | '/' | '\'' => c,
                        'b' => '\u{0008}',
                        'f' => '\u{000C}',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        'u' => {
                            self.unicode.reset();
                            self.state = EscapeUnicode;
                            return Ok(None);
                        }
                        other => return Err(self.invalid_char(other)),
                    };
                    self.buffer.push(unescaped);
                    self.state = self.string_return;
                    Ok(None)
                }
            },

            EscapeUnicode => match next {
                None => Err(self.unexpected_end()),
                Some(c) => {
                    self.bump();
                    if let Some(ch) = self.unicode.feed(c)? {
                        self.buffer.push(ch);
                        self.state = self.string_return;
                    }
                    Ok(None)
                }
            },

            CommentStart => match next {
                Some('/') => {
                    self.bump();
                    self.state = LineComment;
                    Ok(None)
                }
                Some('*') => {
                    self.bump();
                    self.state = BlockComment;
                    Ok(None)
                }
                Some(c) => Err(self.invalid_char(c)),
                None => Err(self.unexpected_end()),
            },

            LineComment => match next {
                // A line comment may be terminated by end of input.
                None => {
                    self.state = Dispatch;
                    Ok(None)
                }
                Some('\n') => {
                    self.bump();
                    self.state = Dispatch;
                    Ok(None)
                }
                Some(_) => {
                    self.bump();
                    Ok(None)
                }
            },

            BlockComment => match next {
                None => Err(self.unexpected_end()),
                Some('*') => {
                    self.bump();
                    self.state = BlockCommentStar;
                    Ok(None)
                }
                Some(_) => {
                    self.bump();
                    Ok(None)
                }
            },

            BlockCommentStar => match next {
                None => Err(self.unexpected_end()),
                Some('/') => {
                    self.bump();
                    self.state = Dispatch;
                    Ok(None)
                }
                Some('*') => {
                    self.bump();
                    Ok(None)
                }
                Some(_) => {
                    self.bump();
                    self.state = BlockComment;
                    Ok(None)
                }
            },
        }
    }
}
