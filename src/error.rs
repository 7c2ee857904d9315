use std::fmt::{Display, Formatter};

/// Category of an evaluation or registry failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Invalid expression: expression is empty")]
    EmptyExpression,
    #[error("Invalid expression: unrecognized token")]
    UnclosedToken,
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Unmatched number of parenthesis")]
    UnmatchedParenthesis,
    #[error("Invalid expression: misplaced comma")]
    InvalidComma,
    #[error("Invalid use of parenthesis")]
    InvalidParenthesis,
    #[error("Not a valid function name: {0}")]
    InvalidFunctionName(String),
    #[error("Cannot override predefined function: {0}")]
    PredefinedOverride(String),
    #[error("Cannot remove predefined function: {0}")]
    PredefinedRemoval(String),
    #[error("Function not found: {0}")]
    FunctionNotFound(String),
    #[error("{0}")]
    Function(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub kind: ErrorKind,
    pub position: Option<usize>,
}

impl Error {
    pub fn new(kind: ErrorKind, position: Option<usize>) -> Self {
        Self { kind, position }
    }

    /// Failure raised from inside a user supplied function.
    pub fn function<M: Into<String>>(message: M) -> Self {
        Self::new(ErrorKind::Function(message.into()), None)
    }

    /// Attach a position unless one is already known.
    pub(crate) fn at(mut self, position: usize) -> Self {
        self.position.get_or_insert(position);
        self
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, None)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{} at position {}", self.kind, pos),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position_when_known() {
        let err = Error::new(ErrorKind::InvalidComma, Some(3));
        assert_eq!(err.to_string(), "Invalid expression: misplaced comma at position 3");
        let err: Error = ErrorKind::UnmatchedParenthesis.into();
        assert_eq!(err.to_string(), "Unmatched number of parenthesis");
    }

    #[test]
    fn at_keeps_first_position() {
        let err = Error::new(ErrorKind::InvalidExpression, Some(1)).at(7);
        assert_eq!(err.position, Some(1));
        let err = Error::from(ErrorKind::InvalidExpression).at(7);
        assert_eq!(err.position, Some(7));
    }
}
