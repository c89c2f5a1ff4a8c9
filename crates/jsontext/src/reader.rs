//! The table-driven pull parser.
//!
//! [`JsonReader`] drives the [`Lexer`] through a predictive LL(1) automaton.
//! Each successful [`read`](JsonReader::read) consumes just enough tokens to
//! surface one [`JsonEvent`]; the automaton stack holds the unexpanded
//! remainder of the grammar. After a document completes, another `read`
//! starts over on any remaining text, so several concatenated documents can
//! be pulled from one source.
//!
//! # Examples
//!
//! ```
//! use jsontext::{JsonEvent, JsonReader};
//!
//! let mut reader = JsonReader::from_string(r#"{"a": 1}"#);
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.token(), Some(&JsonEvent::ObjectStart));
//! assert!(reader.read().unwrap());
//! assert_eq!(reader.token(), Some(&JsonEvent::PropertyName("a".into())));
//! ```

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};

use crate::{
    error::JsonError,
    event::JsonEvent,
    grammar::{NonTerminal, Symbol, Terminal, PARSE_TABLE},
    lexer::Lexer,
    options::ReaderOptions,
    source::{CharSource, StringSource},
};

/// A pull reader over JSON text.
///
/// One token event is produced per [`read`](JsonReader::read) call, in
/// strict document order. The reader also implements `Iterator`, yielding
/// `Result<JsonEvent, JsonError>` across all documents in the source.
#[derive(Debug)]
pub struct JsonReader<S> {
    lexer: Lexer<S>,
    stack: Vec<Symbol>,
    /// The latched lookahead terminal; `None` once the lexer is exhausted.
    terminal: Option<Terminal>,
    token: Option<JsonEvent>,
    started: bool,
    end_of_json: bool,
    closed: bool,
    /// Advisory flag for a mapping layer; see
    /// [`ReaderOptions::skip_non_members`].
    pub skip_non_members: bool,
}

impl JsonReader<StringSource> {
    /// Creates a reader that owns `text`, with default options.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::new(StringSource::new(text), ReaderOptions::default())
    }
}

impl<S: CharSource> JsonReader<S> {
    /// Creates a reader over an arbitrary character source.
    pub fn new(source: S, options: ReaderOptions) -> Self {
        let mut lexer = Lexer::new(source);
        lexer.allow_comments = options.allow_comments;
        lexer.allow_single_quoted_strings = options.allow_single_quoted_strings;
        Self {
            lexer,
            stack: vec![Symbol::End, Symbol::N(NonTerminal::Text)],
            terminal: None,
            token: None,
            started: false,
            end_of_json: false,
            closed: false,
            skip_non_members: options.skip_non_members,
        }
    }

    /// The event produced by the last successful [`read`](JsonReader::read).
    pub fn token(&self) -> Option<&JsonEvent> {
        self.token.as_ref()
    }

    /// Takes the latched event, leaving `None` behind.
    pub fn take_token(&mut self) -> Option<JsonEvent> {
        self.token.take()
    }

    /// Whether the current document has been fully parsed.
    pub fn end_of_json(&self) -> bool {
        self.end_of_json
    }

    /// Whether the character source is exhausted or the reader was closed.
    pub fn end_of_input(&self) -> bool {
        self.closed || self.lexer.end_of_input()
    }

    /// Seals the reader: subsequent `read` calls return `Ok(false)`.
    ///
    /// The character source itself is released when the reader is dropped.
    pub fn close(&mut self) {
        self.closed = true;
        self.end_of_json = true;
    }

    /// Pulls the next token event out of the document.
    ///
    /// Returns `Ok(true)` when an event was latched (see
    /// [`token`](JsonReader::token)), `Ok(false)` when the current document
    /// has completed or input is exhausted, and an error on malformed input.
    /// After a completed document, the next call starts parsing any
    /// remaining text as a fresh document.
    pub fn read(&mut self) -> Result<bool, JsonError> {
        if self.closed {
            return Ok(false);
        }
        self.token = None;

        if self.end_of_json {
            // The previous document was accepted. Parse a follow-up document
            // if any text remains.
            if self.terminal.is_none() {
                return Ok(false);
            }
            self.stack.clear();
            self.stack.push(Symbol::End);
            self.stack.push(Symbol::N(NonTerminal::Text));
            self.end_of_json = false;
        }

        if !self.started {
            self.started = true;
            self.advance()?;
            if self.terminal.is_none() {
                return Err(JsonError::IncompleteJson);
            }
        }

        // Per-call scratch: string assembly state and the pending event kind.
        let mut in_string = false;
        let mut property_name = false;
        let mut text = String::new();

        loop {
            let Some(symbol) = self.stack.pop() else {
                return Err(JsonError::IncompleteJson);
            };

            match symbol {
                Symbol::End => {
                    // The whole document has been matched. The sentinel is
                    // rebuilt by the next call's stack reset.
                    self.end_of_json = true;
                    return Ok(false);
                }

                Symbol::T(expected) => {
                    let mut yielded = true;
                    match expected {
                        Terminal::LBrace => self.token = Some(JsonEvent::ObjectStart),
                        Terminal::RBrace => self.token = Some(JsonEvent::ObjectEnd),
                        Terminal::LBracket => self.token = Some(JsonEvent::ArrayStart),
                        Terminal::RBracket => self.token = Some(JsonEvent::ArrayEnd),
                        Terminal::Number => {
                            self.token = Some(classify_number(self.lexer.string_value())?);
                        }
                        Terminal::True => self.token = Some(JsonEvent::Boolean(true)),
                        Terminal::False => self.token = Some(JsonEvent::Boolean(false)),
                        Terminal::Null => self.token = Some(JsonEvent::Null),
                        Terminal::Quote if !in_string => {
                            in_string = true;
                            yielded = false;
                        }
                        Terminal::Quote => {
                            in_string = false;
                            let value = core::mem::take(&mut text);
                            self.token = Some(if property_name {
                                JsonEvent::PropertyName(value)
                            } else {
                                JsonEvent::String(value)
                            });
                        }
                        Terminal::Chars => {
                            text.push_str(self.lexer.string_value());
                            yielded = false;
                        }
                        Terminal::Comma | Terminal::Colon => yielded = false,
                    }

                    match self.terminal {
                        Some(current) if current == expected => self.advance()?,
                        Some(current) => return Err(JsonError::InvalidToken(current.name())),
                        None => return Err(JsonError::IncompleteJson),
                    }

                    if yielded {
                        return Ok(true);
                    }
                }

                Symbol::N(nonterminal) => {
                    if nonterminal == NonTerminal::Pair {
                        property_name = true;
                    }
                    let Some(current) = self.terminal else {
                        return Err(JsonError::IncompleteJson);
                    };
                    let Some(production) =
                        PARSE_TABLE[nonterminal as usize][current as usize]
                    else {
                        return Err(JsonError::InvalidToken(current.name()));
                    };
                    for symbol in production.iter().rev() {
                        self.stack.push(*symbol);
                    }
                }
            }
        }
    }

    /// Consumes the latched terminal by lexing the next one.
    fn advance(&mut self) -> Result<(), JsonError> {
        self.terminal = if self.lexer.next_token()? {
            self.lexer.token().map(Terminal::from_token)
        } else {
            None
        };
        Ok(())
    }
}

impl<S: CharSource> Iterator for JsonReader<S> {
    type Item = Result<JsonEvent, JsonError>;

    /// Yields events across every document in the source. An error seals
    /// the reader.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read() {
                Ok(true) => return self.take_token().map(Ok),
                Ok(false) if self.closed || self.end_of_input() => return None,
                Ok(false) if self.end_of_json => continue,
                Ok(false) => return None,
                Err(err) => {
                    self.close();
                    return Some(Err(err));
                }
            }
        }
    }
}

/// Classifies a numeric lexeme into the narrowest exact representation.
///
/// Lexemes with a fraction or exponent part become `Double`; the rest are
/// tried as `i32`, then `i64`, then `u64`. Anything that fits none of those
/// is out of range.
fn classify_number(text: &str) -> Result<JsonEvent, JsonError> {
    if text.contains(['.', 'e', 'E']) {
        let value: f64 = text
            .parse()
            .map_err(|_| JsonError::NumberOutOfRange(text.to_string()))?;
        if value.is_finite() {
            return Ok(JsonEvent::Double(value));
        }
        return Err(JsonError::NumberOutOfRange(text.to_string()));
    }
    if let Ok(value) = text.parse::<i32>() {
        return Ok(JsonEvent::Int(value));
    }
    if let Ok(value) = text.parse::<i64>() {
        return Ok(JsonEvent::Long(value));
    }
    if let Ok(value) = text.parse::<u64>() {
        return Ok(JsonEvent::ULong(value));
    }
    Err(JsonError::NumberOutOfRange(text.to_string()))
}
