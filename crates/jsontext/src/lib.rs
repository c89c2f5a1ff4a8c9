//! Streaming JSON text processing: a character-driven lexer, a table-driven
//! pull parser, and a validating writer.
//!
//! The three components compose bottom-up and share no runtime state:
//!
//! - [`Lexer`] pulls characters from a [`CharSource`] and recognizes one
//!   JSON lexeme at a time, with one-character lookahead, optional `//` and
//!   `/* */` comments, and optional single-quoted strings.
//! - [`JsonReader`] drives the lexer through a constant LL(1) parse table
//!   and surfaces one [`JsonEvent`] per [`read`](JsonReader::read) call,
//!   classifying numbers into their narrowest exact representation.
//! - [`JsonWriter`] renders value and structure calls to any
//!   [`core::fmt::Write`] sink, validating call order, inserting commas and
//!   indentation, and escaping strings to plain ASCII.
//!
//! # Examples
//!
//! Pull events out of a document:
//!
//! ```
//! use jsontext::{JsonEvent, JsonReader};
//!
//! let mut reader = JsonReader::from_string(r#"{"greeting": "hi"} // trailing"#);
//! let events: Vec<_> = (&mut reader).map(Result::unwrap).collect();
//! assert_eq!(
//!     events,
//!     vec![
//!         JsonEvent::ObjectStart,
//!         JsonEvent::PropertyName("greeting".into()),
//!         JsonEvent::String("hi".into()),
//!         JsonEvent::ObjectEnd,
//!     ]
//! );
//! ```
//!
//! Render a document:
//!
//! ```
//! use jsontext::{JsonWriter, WriterOptions};
//!
//! let mut writer = JsonWriter::new(WriterOptions::default());
//! writer.write_array_start().unwrap();
//! writer.write_double(3e2).unwrap();
//! writer.write_null().unwrap();
//! writer.write_array_end().unwrap();
//! assert_eq!(writer.as_str(), "[300.0,null]");
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape_buffer;
mod event;
mod grammar;
mod keyword;
mod lexer;
mod options;
mod reader;
mod source;
mod writer;

pub use error::JsonError;
pub use event::JsonEvent;
pub use lexer::{Lexer, TokenKind};
pub use options::{ReaderOptions, WriterOptions};
pub use reader::JsonReader;
pub use source::{CharSource, IterSource, StringSource};
pub use writer::JsonWriter;

#[cfg(test)]
mod tests;
