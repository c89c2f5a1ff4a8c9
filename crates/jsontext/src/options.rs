//! Configuration for the reader and the writer.

/// Configuration options for [`JsonReader`](crate::JsonReader).
///
/// # Examples
///
/// ```
/// use jsontext::{JsonReader, ReaderOptions, StringSource};
///
/// let strict = ReaderOptions {
///     allow_comments: false,
///     allow_single_quoted_strings: false,
///     ..Default::default()
/// };
/// let reader = JsonReader::new(StringSource::new("[1]"), strict);
/// # let _ = reader;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    /// Whether the lexer recognizes `//` line and `/* */` block comments.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_comments: bool,

    /// Whether the lexer recognizes single-quoted strings. Escape rules
    /// match double-quoted strings; the delimiters never reach the parser.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_single_quoted_strings: bool,

    /// Advises a mapping layer to skip and discard members it does not
    /// recognize instead of failing. The core reader itself only carries
    /// this flag; it emits tokens for every member either way.
    ///
    /// # Default
    ///
    /// `true`
    pub skip_non_members: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            allow_comments: true,
            allow_single_quoted_strings: true,
            skip_non_members: true,
        }
    }
}

/// Configuration options for [`JsonWriter`](crate::JsonWriter).
///
/// # Examples
///
/// ```
/// use jsontext::{JsonWriter, WriterOptions};
///
/// let mut writer = JsonWriter::new(WriterOptions {
///     pretty_print: true,
///     indent_value: 2,
///     ..Default::default()
/// });
/// writer.write_array_start().unwrap();
/// writer.write_array_end().unwrap();
/// assert_eq!(writer.as_str(), "[]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// Emit newlines, indentation, and aligned property names.
    ///
    /// # Default
    ///
    /// `false`
    pub pretty_print: bool,

    /// Width in spaces of one indentation step in pretty mode.
    ///
    /// # Default
    ///
    /// `4`
    pub indent_value: usize,

    /// Check every call against the writer state machine and refuse
    /// sequences that would produce malformed JSON.
    ///
    /// # Default
    ///
    /// `true`
    pub validate: bool,

    /// Lowercase property names (locale-invariant) before writing them.
    ///
    /// # Default
    ///
    /// `false`
    pub lower_case_properties: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent_value: 4,
            validate: true,
            lower_case_properties: false,
        }
    }
}
