//! Source locations attached to operations.

use std::fmt;
use std::sync::Arc;

/// Where an operation came from in the source program.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Location {
    #[default]
    Unknown,

    FileLineCol {
        file: Arc<str>,
        line: u32,
        column: u32,
    },
}

impl Location {
    pub fn file_line_col(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Location::FileLineCol {
            file: file.into(),
            line,
            column,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Location::Unknown)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Unknown => write!(f, "loc(unknown)"),
            Location::FileLineCol { file, line, column } => {
                write!(f, "{}:{}:{}", file, line, column)
            }
        }
    }
}
