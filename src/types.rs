use std::fmt::{Display, Formatter};

use crate::error::{Error, ErrorKind};

/// A numeric value flowing through the operand stack.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Operand(f64);

impl Operand {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn to_f64(self) -> f64 {
        self.0
    }

    /// Parse a numeric literal such as `12`, `.5`, `3.`, `1e-2` or `6.02E+23`.
    /// Surrounding whitespace is ignored, signs are not part of a literal.
    pub fn parse(literal: &str) -> Result<Self, Error> {
        let trimmed = literal.trim();
        if !is_literal(trimmed) {
            return Err(ErrorKind::InvalidExpression.into());
        }
        trimmed
            .parse::<f64>()
            .map(Self)
            .map_err(|_| ErrorKind::InvalidExpression.into())
    }

    pub fn is_operand(s: &str) -> bool {
        is_literal(s.trim())
    }
}

fn is_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut mantissa_digits = 0;

    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return false;
        }
    }

    i == bytes.len()
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Operand> for f64 {
    fn from(operand: Operand) -> Self {
        operand.0
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tie-break rule between operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Associativity {
    #[default]
    Left,
    Right,
    /// Never resolved against itself, used by the unary signs.
    No,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_grammar() {
        for ok in ["0", "12", "3.", ".5", "1.25", "1e5", "1e+2", "1e-2", "6.02E23", " 7 ", "2 "] {
            assert!(Operand::is_operand(ok), "{ok:?} should be an operand");
        }
        for bad in ["", " ", ".", "e5", "1e", "1e+", "+1", "-1", "1.2.3", "inf", "nan", "1 2", "0x10"] {
            assert!(!Operand::is_operand(bad), "{bad:?} should not be an operand");
        }
    }

    #[test]
    fn parse_values() {
        assert_eq!(Operand::parse("1e+2").unwrap().to_f64(), 100.0);
        assert_eq!(Operand::parse(" .25").unwrap().to_f64(), 0.25);
        assert_eq!(Operand::parse("abc").unwrap_err().kind, ErrorKind::InvalidExpression);
    }
}
