use std::fmt;
use std::path::PathBuf;

/// The type of error that can occur when writing test cases, evaluating them or reading transcripts.
///
/// Division by zero is not an error: the oracle maps it to [`crate::DIVISION_BY_ZERO`].
#[derive(Debug)]
pub struct Error(pub(crate) ErrorRepr);

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.0 {
            ErrorRepr::Io(_, e) => Some(e),
            ErrorRepr::Syntax { err, .. } => Some(err),
            ErrorRepr::Generate(e) => Some(e),
        }
    }
}

#[derive(Debug)]
pub(crate) enum ErrorRepr {
    Io(PathBuf, std::io::Error),
    Syntax {
        line: usize,
        expr: String,
        err: peg::error::ParseError<peg::str::LineCol>,
    },
    Generate(arbitrary::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        Self(ErrorRepr::Io(path.into(), e))
    }

    /// Returns `true` if the error came from an expression the oracle could not parse.
    pub fn is_syntax(&self) -> bool {
        matches!(self.0, ErrorRepr::Syntax { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            ErrorRepr::Io(path, e) => write!(f, "{}: {}", path.display(), e),
            ErrorRepr::Syntax { line, expr, err } => {
                write!(f, "line {}: invalid expression {:?}: {}", line, expr, err)
            }
            ErrorRepr::Generate(e) => write!(f, "could not generate expression: {}", e),
        }
    }
}
