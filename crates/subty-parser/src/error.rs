use itertools::Itertools;
use subty_error::{Error, ErrorKind};
use subty_location::ByteRange;

use lalrpop_util::{lexer::Token, ParseError};

pub fn from_lalrpop(err: ParseError<usize, Token<'_>, &'static str>) -> Error {
    use ParseError::*;
    match err {
        InvalidToken { location } => error("invalid token".to_owned(), location, location),
        UnrecognizedEof { location, expected } => error(
            format!("unrecognized eof, expected one of {}", expected.iter().join(", ")),
            location,
            location,
        ),
        UnrecognizedToken {
            token: (start, token, end),
            ..
        } => error(format!("unrecognized token '{}'", token.1), start, end),
        ExtraToken {
            token: (start, token, end),
        } => error(format!("extra token '{}'", token.1), start, end),
        User { error } => Error::unlocated(ErrorKind::Syntax, error),
    }
}

fn error(message: String, start: usize, end: usize) -> Error {
    Error::syntax(message, ByteRange::new(start, end))
}
