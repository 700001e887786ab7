//! # Error and Result for this crate
//!
//! This crate reports every failure through a single [Error] structure, whether it comes from the
//! lexer, the parser, the printer's sink, a visitor callback, or cancellation.

use std::ops::Range;
use std::{error, fmt, io, result};

/// This crate's result type using the [Error] structure.
pub type Result<T> = result::Result<T, Error>;

/// The category of a failure, mirroring the stages of the pipeline.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorType {
    /// A malformed token; the input could not be scanned any further.
    Lex,
    /// An unexpected token for the grammar production being parsed.
    Syntax,
    /// A rule violation beyond raw syntax, e.g. a fragment named `on`, a duplicate type
    /// definition, or an empty enum at print time.
    Semantic,
    /// An error surfaced from the output sink while formatting.
    Io,
    /// The caller aborted the parse through a cancellation handle.
    Cancelled,
}

impl ErrorType {
    fn prefix(self) -> &'static str {
        match self {
            ErrorType::Lex => "Lex Error",
            ErrorType::Syntax => "Syntax Error",
            ErrorType::Semantic => "Semantic Error",
            ErrorType::Io => "IO Error",
            ErrorType::Cancelled => "Cancelled",
        }
    }
}

/// A line/column pair pointing into the parsed source text.
///
/// Both components are 1-based; byte offsets are carried separately by token positions.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// This crate's error structure which internal errors are converted into.
///
/// The error is split into a general message and a context string. For parsing the context string
/// is populated with a snippet of the source text; for validation it stays empty.
///
/// The Error implements both the [`fmt::Display`] and [`fmt::Debug`] traits, and implements
/// [`error::Error`] so that it can be used with existing patterns for error handling.
#[derive(PartialEq, Eq, Clone)]
pub struct Error {
    pub(crate) message: String,
    pub(crate) location: Option<Location>,
    pub(crate) context: Option<String>,
    pub(crate) error_type: ErrorType,
}

impl Error {
    /// Create a new Error with only a main message from an input string.
    pub fn new<S: Into<String>>(message: S, error_type: ErrorType) -> Self {
        Self {
            message: message.into(),
            location: None,
            context: None,
            error_type,
        }
    }

    /// Create a new Error carrying a location and a source-snippet context string.
    pub fn new_with_context<S: Into<String>>(
        message: S,
        location: Option<Location>,
        context: String,
        error_type: ErrorType,
    ) -> Self {
        Self {
            message: message.into(),
            location,
            context: Some(context),
            error_type,
        }
    }

    /// Returns the message of the current error. The context is discarded.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the location of the current error, if one is known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the category of the current error.
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// Formats this error, with the option to include the context information as well,
    /// which will cause the string to be multi-line.
    pub fn print(&self, include_ctx: bool) -> String {
        let formatted = format!("{}: {}", self.error_type.prefix(), self.message);
        match self.context {
            Some(ref context) if include_ctx => format!("{formatted}\n{context}"),
            _ => formatted,
        }
    }

    /// Prefixes the message with the label of the construct that was being processed.
    pub(crate) fn with_label(mut self, label: &str) -> Self {
        self.message = format!("{label}: {}", self.message);
        self
    }
}

/// Renders the source line containing `span` with its line number and a caret underline.
pub(crate) fn print_span(source: &str, span: Range<usize>) -> String {
    let start = span.start.min(source.len());
    let line_start = source[..start].rfind('\n').map_or(0, |idx| idx + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |idx| start + idx);
    let line_num = source[..start].matches('\n').count() + 1;

    let prefix = format!(" {line_num} | ");
    let mut out = String::new();
    out.push_str(&prefix);
    out.push_str(&source[line_start..line_end]);
    out.push('\n');
    for _ in 0..prefix.len() + (start - line_start) {
        out.push(' ');
    }
    let width = span.end.clamp(start, line_end).saturating_sub(start).max(1);
    for _ in 0..width {
        out.push('^');
    }
    out
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::new(error.to_string(), ErrorType::Io)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.print(true))
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{self}\n")
    }
}

impl error::Error for Error {}
