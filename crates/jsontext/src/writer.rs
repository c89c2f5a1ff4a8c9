//! The validating streaming writer.
//!
//! [`JsonWriter`] renders JSON one call at a time to a [`core::fmt::Write`]
//! sink, inserting structural commas and (optionally) indentation itself. A
//! stack of context frames mirrors the open containers; with validation on
//! (the default) every call is checked against that stack, so an ill-formed
//! call sequence fails instead of producing broken output.
//!
//! # Examples
//!
//! ```
//! use jsontext::{JsonWriter, WriterOptions};
//!
//! let mut writer = JsonWriter::new(WriterOptions::default());
//! writer.write_object_start().unwrap();
//! writer.write_property_name("a").unwrap();
//! writer.write_int(1).unwrap();
//! writer.write_object_end().unwrap();
//! assert_eq!(writer.as_str(), r#"{"a":1}"#);
//! ```

use alloc::{
    format,
    string::{String, ToString},
};
use core::fmt::Write;

use crate::{error::JsonError, options::WriterOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Array,
    Object,
}

/// Bookkeeping for one open container (or the document root).
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    /// True between a property name and its value.
    expecting_value: bool,
    /// Children emitted so far; decides whether a comma is due.
    count: usize,
    /// Longest property name seen so far in this object, for pretty
    /// alignment.
    padding: usize,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            expecting_value: false,
            count: 0,
            padding: 0,
        }
    }
}

/// A streaming JSON writer over a character sink.
///
/// The sink defaults to an internally owned `String`; pass `&mut W` to
/// [`with_sink`](JsonWriter::with_sink) to lend an external sink instead,
/// which the writer then never consumes. Output is strictly ordered by call
/// order.
#[derive(Debug)]
pub struct JsonWriter<W = String> {
    sink: W,
    frames: alloc::vec::Vec<Frame>,
    indent: usize,
    has_reached_end: bool,
    options: WriterOptions,
}

impl JsonWriter<String> {
    /// Creates a writer rendering into an internal `String` buffer.
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        Self::with_sink(String::new(), options)
    }

    /// The text rendered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.sink
    }

    /// Takes the rendered text and resets the writer for a new document.
    pub fn take_output(&mut self) -> String {
        let out = core::mem::take(&mut self.sink);
        self.reset();
        out
    }

    /// Consumes the writer, returning the rendered text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.sink
    }
}

impl<W: Write> JsonWriter<W> {
    /// Creates a writer rendering into `sink`.
    pub fn with_sink(sink: W, options: WriterOptions) -> Self {
        Self {
            sink,
            frames: alloc::vec![Frame::new(FrameKind::Root)],
            indent: 0,
            has_reached_end: false,
            options,
        }
    }

    /// The underlying sink.
    ///
    /// Raw access exists so that a mapping layer can splice pre-rendered
    /// JSON directly into the output; anything written through it bypasses
    /// validation and separator handling.
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Clears all writer state, permitting a new document.
    ///
    /// The sink is left untouched; with an internal `String` buffer, use
    /// [`take_output`](JsonWriter::take_output) to recover the text and
    /// reset in one step.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::new(FrameKind::Root));
        self.indent = 0;
        self.has_reached_end = false;
    }

    /// Opens an object.
    pub fn write_object_start(&mut self) -> Result<(), JsonError> {
        self.begin_value()?;
        self.sink.write_char('{')?;
        self.frames.push(Frame::new(FrameKind::Object));
        self.indent += self.options.indent_value;
        Ok(())
    }

    /// Closes the innermost object.
    pub fn write_object_end(&mut self) -> Result<(), JsonError> {
        if self.options.validate {
            self.check_not_ended()?;
            match self.top() {
                Frame {
                    kind: FrameKind::Object,
                    expecting_value: true,
                    ..
                } => return Err(JsonError::ExpectedProperty),
                Frame {
                    kind: FrameKind::Object,
                    ..
                } => {}
                _ => return Err(JsonError::CantCloseObject),
            }
        }
        self.close_container('}', FrameKind::Object)
    }

    /// Opens an array.
    pub fn write_array_start(&mut self) -> Result<(), JsonError> {
        self.begin_value()?;
        self.sink.write_char('[')?;
        self.frames.push(Frame::new(FrameKind::Array));
        self.indent += self.options.indent_value;
        Ok(())
    }

    /// Closes the innermost array.
    pub fn write_array_end(&mut self) -> Result<(), JsonError> {
        if self.options.validate {
            self.check_not_ended()?;
            if self.top().kind != FrameKind::Array {
                return Err(JsonError::CantCloseArray);
            }
        }
        self.close_container(']', FrameKind::Array)
    }

    /// Writes a property name and its `:` separator.
    pub fn write_property_name(&mut self, name: &str) -> Result<(), JsonError> {
        if self.options.validate {
            self.check_not_ended()?;
            let frame = self.top();
            if frame.kind != FrameKind::Object || frame.expecting_value {
                return Err(JsonError::CantAddProperty);
            }
        }

        if self.top().count > 0 {
            self.sink.write_char(',')?;
        }
        if self.options.pretty_print {
            self.sink.write_char('\n')?;
            self.write_indent()?;
        }
        self.top_mut().count += 1;

        if self.options.lower_case_properties {
            let lowered = name.to_lowercase();
            self.write_name(&lowered)?;
        } else {
            self.write_name(name)?;
        }

        self.top_mut().expecting_value = true;
        Ok(())
    }

    /// Writes a boolean value.
    pub fn write_bool(&mut self, value: bool) -> Result<(), JsonError> {
        self.begin_value()?;
        self.sink.write_str(if value { "true" } else { "false" })?;
        self.end_value();
        Ok(())
    }

    /// Writes a 32-bit signed integer value.
    pub fn write_int(&mut self, value: i32) -> Result<(), JsonError> {
        self.begin_value()?;
        write!(self.sink, "{value}")?;
        self.end_value();
        Ok(())
    }

    /// Writes a 64-bit signed integer value.
    pub fn write_long(&mut self, value: i64) -> Result<(), JsonError> {
        self.begin_value()?;
        write!(self.sink, "{value}")?;
        self.end_value();
        Ok(())
    }

    /// Writes a 64-bit unsigned integer value.
    pub fn write_ulong(&mut self, value: u64) -> Result<(), JsonError> {
        self.begin_value()?;
        write!(self.sink, "{value}")?;
        self.end_value();
        Ok(())
    }

    /// Writes a floating point value.
    ///
    /// The rendering always carries a `.` or an exponent so that it reads
    /// back as a double; integral values gain a trailing `.0`. Non-finite
    /// values are rejected, JSON having no spelling for them.
    pub fn write_double(&mut self, value: f64) -> Result<(), JsonError> {
        if !value.is_finite() {
            return Err(JsonError::NonFiniteNumber);
        }
        self.begin_value()?;
        let mut text = format!("{value}");
        if !text.contains(['.', 'e', 'E']) {
            text.push_str(".0");
        }
        self.sink.write_str(&text)?;
        self.end_value();
        Ok(())
    }

    /// Writes a pre-rendered numeric literal, e.g. an arbitrary-precision
    /// decimal.
    ///
    /// The text must be a syntactically valid JSON number; it is emitted
    /// verbatim.
    pub fn write_number_literal(&mut self, text: &str) -> Result<(), JsonError> {
        if !is_valid_number(text) {
            return Err(JsonError::InvalidNumberLiteral(text.to_string()));
        }
        self.begin_value()?;
        self.sink.write_str(text)?;
        self.end_value();
        Ok(())
    }

    /// Writes a string value, escaped.
    pub fn write_string(&mut self, value: &str) -> Result<(), JsonError> {
        self.begin_value()?;
        self.write_escaped(value)?;
        self.end_value();
        Ok(())
    }

    /// Writes a `null` value.
    pub fn write_null(&mut self) -> Result<(), JsonError> {
        self.begin_value()?;
        self.sink.write_str("null")?;
        self.end_value();
        Ok(())
    }

    fn top(&self) -> &Frame {
        self.frames.last().expect("writer context stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.frames
            .last_mut()
            .expect("writer context stack is never empty")
    }

    fn check_not_ended(&self) -> Result<(), JsonError> {
        if self.has_reached_end {
            return Err(JsonError::DocumentComplete);
        }
        Ok(())
    }

    /// Validation and separators shared by every value-position write
    /// (scalars and container starts alike).
    fn begin_value(&mut self) -> Result<(), JsonError> {
        if self.options.validate {
            self.check_not_ended()?;
            let frame = self.top();
            if frame.kind == FrameKind::Object && !frame.expecting_value {
                return Err(JsonError::CantAddValue);
            }
        }

        let frame = *self.top();
        if !frame.expecting_value {
            if frame.count > 0 {
                self.sink.write_char(',')?;
            }
            if self.options.pretty_print && frame.kind != FrameKind::Root {
                self.sink.write_char('\n')?;
                self.write_indent()?;
            }
            self.top_mut().count += 1;
        }
        self.top_mut().expecting_value = false;
        Ok(())
    }

    /// Latches completion when a value finishes at the root.
    fn end_value(&mut self) {
        if self.frames.len() == 1 {
            self.has_reached_end = true;
        }
    }

    fn close_container(&mut self, bracket: char, kind: FrameKind) -> Result<(), JsonError> {
        // Never pop the root frame, validated or not.
        if self.frames.len() == 1 {
            return Err(match kind {
                FrameKind::Array => JsonError::CantCloseArray,
                _ => JsonError::CantCloseObject,
            });
        }
        let frame = self.frames.pop().expect("checked above");
        self.indent = self.indent.saturating_sub(self.options.indent_value);
        if self.options.pretty_print && frame.count > 0 {
            self.sink.write_char('\n')?;
            self.write_indent()?;
        }
        self.sink.write_char(bracket)?;
        self.end_value();
        Ok(())
    }

    fn write_indent(&mut self) -> Result<(), JsonError> {
        for _ in 0..self.indent {
            self.sink.write_char(' ')?;
        }
        Ok(())
    }

    /// Writes an escaped property name plus its separator, padding the
    /// colon position in pretty mode.
    ///
    /// The padding high-water mark only grows; names emitted before a
    /// longer sibling keep their narrower spacing.
    fn write_name(&mut self, name: &str) -> Result<(), JsonError> {
        self.write_escaped(name)?;
        if self.options.pretty_print {
            let len = name.chars().count();
            let frame = self.top_mut();
            frame.padding = frame.padding.max(len);
            let spaces = frame.padding - len + 1;
            for _ in 0..spaces {
                self.sink.write_char(' ')?;
            }
            self.sink.write_str(": ")?;
        } else {
            self.sink.write_char(':')?;
        }
        Ok(())
    }

    /// Writes `text` as a double-quoted JSON string token.
    ///
    /// Code points outside `[0x20, 0x7E]` become uppercase `\uXXXX`
    /// escapes, one per UTF-16 unit, so the output is plain ASCII.
    fn write_escaped(&mut self, text: &str) -> Result<(), JsonError> {
        self.sink.write_char('"')?;
        for ch in text.chars() {
            match ch {
                '\n' => self.sink.write_str("\\n")?,
                '\r' => self.sink.write_str("\\r")?,
                '\t' => self.sink.write_str("\\t")?,
                '\u{000C}' => self.sink.write_str("\\f")?,
                '\u{0008}' => self.sink.write_str("\\b")?,
                '"' => self.sink.write_str("\\\"")?,
                '\\' => self.sink.write_str("\\\\")?,
                ' '..='~' => self.sink.write_char(ch)?,
                _ => {
                    let mut units = [0u16; 2];
                    for unit in ch.encode_utf16(&mut units) {
                        write!(self.sink, "\\u{unit:04X}")?;
                    }
                }
            }
        }
        self.sink.write_char('"')?;
        Ok(())
    }
}

/// Textual check that `text` is one complete JSON number.
fn is_valid_number(text: &str) -> bool {
    let mut rest = text.strip_prefix('-').unwrap_or(text);

    // Integer part: `0` alone or a nonzero digit run.
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    match digits {
        0 => return false,
        1 => {}
        _ if rest.starts_with('0') => return false,
        _ => {}
    }
    rest = &rest[digits..];

    if let Some(frac) = rest.strip_prefix('.') {
        let digits = frac.len() - frac.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return false;
        }
        rest = &frac[digits..];
    }

    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        let digits = exp.len() - exp.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return false;
        }
        rest = &exp[digits..];
    }

    rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::is_valid_number;

    #[test]
    fn number_literal_validation() {
        for ok in ["0", "-0", "1", "12.5", "1e9", "-3.25E-7", "0.0"] {
            assert!(is_valid_number(ok), "{ok} should be accepted");
        }
        for bad in ["", "-", "01", "1.", ".5", "1e", "1e+", "+1", "1.2.3", "1x"] {
            assert!(!is_valid_number(bad), "{bad} should be rejected");
        }
    }
}
