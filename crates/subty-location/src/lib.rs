//! This module describes locations in the source code. There are two types of absolute positions
//! using indexes in the raw string that are [Byte] and [ByteRange]. There are also two types of
//! positions that are [Point] and [Range] that have line and column numbers instead, which is the
//! form used when a location is embedded in a diagnostic.

use core::fmt;
use std::fmt::Display;

/// Byte position in a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Byte(pub usize);

impl Byte {
    /// Discovers a [Point] that is a line and column structure using the index inside the source
    /// code.
    pub fn locate(&self, code: &str) -> Point {
        let mut acc = 0;
        for (line, code_line) in code.lines().enumerate() {
            if acc + code_line.len() + 1 > self.0 {
                return Point {
                    line,
                    column: self.0 - acc,
                };
            }
            acc += code_line.len() + 1;
        }
        Point::default()
    }
}

/// Two byte positions inside a source file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ByteRange(pub Byte, pub Byte);

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self(Byte(start), Byte(end))
    }

    pub fn singleton(byte: usize) -> Self {
        Self(Byte(byte), Byte(byte))
    }

    /// The smallest range that covers both ranges.
    pub fn mix(self, other: Self) -> Self {
        Self(self.0.min(other.0), self.1.max(other.1))
    }

    pub fn locate(&self, code: &str) -> Range {
        Range(self.0.locate(code), self.1.locate(code))
    }
}

/// Line and column position inside a source file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// Two line and column positions ([Point]s) inside a source file.
#[derive(Debug, PartialEq, Eq)]
pub struct Range(pub Point, pub Point);

impl Range {
    /// Creates a new range using two byte positions.
    pub fn new(start: usize, end: usize, code: &str) -> Self {
        Self(Byte(start).locate(code), Byte(end).locate(code))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 != self.1 {
            write!(f, "{}~{}", self.0, self.1)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A syntactic element together with the place where it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Located<T> {
    pub location: ByteRange,
    pub data: T,
}

impl<T: Display> Display for Located<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl<T> Located<T> {
    pub fn new(location: ByteRange, data: T) -> Self {
        Self { location, data }
    }

    pub fn map<R>(self, f: impl Fn(T) -> R) -> Located<R> {
        Located {
            location: self.location,
            data: f(self.data),
        }
    }
}
