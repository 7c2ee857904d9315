use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::error::{Error, ErrorKind};
use crate::types::{Associativity, Operand};

/// Precedence assigned to every function, built-in or user supplied.
pub const FUNCTION_PRECEDENCE: u8 = 4;
/// Precedence of zero-argument functions (constants, `rand`).
pub const CONSTANT_PRECEDENCE: u8 = 5;

pub type BuiltinFn = fn(&[Operand]) -> Operand;
pub type FunctionFn = Arc<dyn Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync>;

/// Number of operands an operator consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Resolved per call by counting the commas inside the argument list.
    Variadic,
}

/// What happens when an operator is popped off the operator stack.
#[derive(Clone)]
pub enum Action {
    /// Arithmetic and sign operators.
    Builtin(BuiltinFn),
    /// Named functions, including zero-argument constants.
    Function(FunctionFn),
    /// `(`, `)` and `,`; handled structurally by the evaluator.
    Marker,
}

#[derive(Clone)]
pub struct Properties {
    pub arity: Arity,
    pub precedence: u8,
    pub associativity: Associativity,
    pub action: Action,
}

impl Properties {
    pub fn marker() -> Self {
        Self {
            arity: Arity::Fixed(0),
            precedence: 0,
            associativity: Associativity::Left,
            action: Action::Marker,
        }
    }

    pub fn builtin(arity: usize, precedence: u8, associativity: Associativity, f: BuiltinFn) -> Self {
        Self {
            arity: Arity::Fixed(arity),
            precedence,
            associativity,
            action: Action::Builtin(f),
        }
    }

    pub fn function<F>(arity: Arity, precedence: u8, f: F) -> Self
    where
        F: Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync + 'static,
    {
        Self {
            arity,
            precedence,
            associativity: Associativity::Left,
            action: Action::Function(Arc::new(f)),
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.action, Action::Function(_))
    }

    pub fn is_variable_or_constant(&self) -> bool {
        self.is_function() && self.arity == Arity::Fixed(0)
    }

    pub fn apply(&self, operands: &[Operand]) -> Result<Operand, Error> {
        match &self.action {
            Action::Builtin(f) => Ok(f(operands)),
            Action::Function(f) => f(operands),
            Action::Marker => Err(ErrorKind::InvalidExpression.into()),
        }
    }
}

impl Debug for Properties {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let action = match self.action {
            Action::Builtin(_) => "builtin",
            Action::Function(_) => "function",
            Action::Marker => "marker",
        };
        f.debug_struct("Properties")
            .field("arity", &self.arity)
            .field("precedence", &self.precedence)
            .field("associativity", &self.associativity)
            .field("action", &action)
            .finish()
    }
}
