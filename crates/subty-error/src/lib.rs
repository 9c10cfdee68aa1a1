//! Errors reported by the parser and the checker. A [Error] is either a type error that the author
//! of the checked program caused, or a bug that shows a syntactic form the checker does not cover
//! yet. Neither is recovered from inside the checker.

use core::fmt;
use std::fmt::Display;

use subty_location::{ByteRange, Point, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The parser rejected the source text.
    Syntax,
    /// The checked program is ill typed.
    Type,
    /// The checker reached a form it does not implement.
    Bug,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax error"),
            Self::Type => write!(f, "error"),
            Self::Bug => write!(f, "bug"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    location: Option<ByteRange>,
}

impl Error {
    pub fn new(message: impl Into<String>, location: ByteRange) -> Self {
        Self {
            kind: ErrorKind::Type,
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn bug(message: impl Into<String>, location: ByteRange) -> Self {
        Self {
            kind: ErrorKind::Bug,
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn syntax(message: impl Into<String>, location: ByteRange) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            message: message.into(),
            location: Some(location),
        }
    }

    /// An error that is not tied to any place in the source.
    pub fn unlocated(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_bug(&self) -> bool {
        self.kind == ErrorKind::Bug
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<ByteRange> {
        self.location
    }

    /// Renders the location as `line:column` against the code it was reported on.
    pub fn render_location(&self, code: &str) -> Option<String> {
        self.location.map(|location| location.locate(code).to_string())
    }

    pub fn with_code<'a>(self, code: &'a str, file_name: &'a str) -> ErrorWithCode<'a> {
        ErrorWithCode {
            err: self,
            code,
            file_name,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

pub struct ErrorWithCode<'a> {
    err: Error,
    code: &'a str,
    file_name: &'a str,
}

impl<'a> Display for ErrorWithCode<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            err: Error {
                kind,
                message,
                location,
            },
            code,
            file_name,
        } = self;

        const PAD: usize = 3;

        writeln!(f, "\n[{kind}]: {message}\n")?;

        let Some(location) = location else {
            return writeln!(f, "{:>PAD$} ┌─> {file_name}", "");
        };

        let Range(start @ Point { line, column }, end) = location.locate(code);

        writeln!(f, "{:>PAD$} ┌─> {file_name}:{start}", "")?;
        writeln!(f, "{:>PAD$} │", "")?;

        for (line, line_number) in code.lines().skip(line).zip(line..=end.line) {
            writeln!(f, "{:>PAD$} │ {}", line_number + 1, line)?;
        }

        if line == end.line {
            let size = (end.column - column).max(1);
            writeln!(f, "{:>PAD$} │ {:>column$}{:^>size$}", "", "", "")?;
        }

        writeln!(f, "{:>PAD$} │", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_location_against_code() {
        let err = Error::new("no such property y", ByteRange::new(4, 7));
        assert_eq!(err.render_location("let x.y;"), Some("1:5~1:8".to_string()));
        assert_eq!(err.to_string(), "no such property y");
        assert!(!err.is_bug());
    }

    #[test]
    fn report_points_at_the_span() {
        let code = "x.y;";
        let report = Error::new(". expects object", ByteRange::new(0, 1))
            .with_code(code, "main.sb")
            .to_string();

        assert!(report.contains("[error]: . expects object"));
        assert!(report.contains("main.sb:1:1"));
        assert!(report.contains("  1 │ x.y;"));
    }

    #[test]
    fn unlocated_errors_have_no_location() {
        let err = Error::unlocated(ErrorKind::Bug, "unimplemented");
        assert!(err.is_bug());
        assert_eq!(err.render_location("abc"), None);
    }
}
