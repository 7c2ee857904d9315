use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::lexer::{classify, is_unary_sign, normalize, Classification, Previous};
use crate::operator::{Arity, Properties};
use crate::registry::OperatorRegistry;
use crate::types::{Associativity, Operand};

use super::rounding::round_half_up;

/// Shunting-yard evaluator that reduces the expression while scanning it,
/// using an operand stack and an operator stack instead of building a tree.
pub struct Evaluator<'r> {
    registry: &'r OperatorRegistry,
    config: Config,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r OperatorRegistry) -> Self {
        Self::with_config(registry, Config::default())
    }

    pub fn with_config(registry: &'r OperatorRegistry, config: Config) -> Self {
        Self { registry, config }
    }

    /// Evaluate `expr` and round the result to the configured precision.
    /// Infinite and NaN results are returned as they are.
    pub fn evaluate(&self, expr: &str) -> Result<f64, Error> {
        let raw = self.evaluate_operand(expr)?.to_f64();
        let result = round_half_up(raw, self.config.precision);
        debug!(expr, raw, result, "evaluated expression");
        Ok(result)
    }

    /// Evaluate `expr` without the final rounding.
    pub fn evaluate_operand(&self, expr: &str) -> Result<Operand, Error> {
        Machine::new(self.registry).run(expr)
    }
}

/// An operator waiting on the operator stack, with the number of operands it
/// will consume. Variadic functions get their count when the call closes.
#[derive(Debug, Clone)]
struct Pending {
    key: String,
    props: Arc<Properties>,
    operands: usize,
}

#[derive(Debug, Clone)]
enum StackEntry {
    OpenParen,
    Operator(Pending),
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    /// Argument list of a function; `base` is the operand depth when it opened.
    Call { arity: Arity, args: usize, base: usize },
    /// Plain parenthesised group nested inside a call.
    Group,
}

/// Per-call evaluation state; dropped as soon as `run` returns.
struct Machine<'r> {
    registry: &'r OperatorRegistry,
    operands: Vec<Operand>,
    operators: Vec<StackEntry>,
    frames: Vec<Frame>,
    previous: Option<Previous>,
}

impl<'r> Machine<'r> {
    fn new(registry: &'r OperatorRegistry) -> Self {
        Self {
            registry,
            operands: Vec::new(),
            operators: Vec::new(),
            frames: Vec::new(),
            previous: None,
        }
    }

    fn run(mut self, expr: &str) -> Result<Operand, Error> {
        let expr = normalize(expr);
        if expr.is_empty() {
            return Err(ErrorKind::EmptyExpression.into());
        }

        let chars: Vec<char> = expr.chars().collect();
        let mut buffer = String::new();
        for (pos, &ch) in chars.iter().enumerate() {
            let next = chars.get(pos + 1).copied();
            match classify(self.registry, &buffer, ch, next) {
                Classification::Operator(token) => {
                    self.dispatch(token, next, pos).map_err(|e| e.at(pos))?;
                    buffer.clear();
                }
                Classification::Operand(literal) => {
                    trace!(literal = literal.trim(), "operand");
                    self.operands.push(Operand::parse(&literal).map_err(|e| e.at(pos))?);
                    self.previous = Some(Previous::Operand);
                    buffer.clear();
                }
                Classification::Pending => buffer.push(ch),
            }
        }

        if !buffer.is_empty() {
            return Err(Error::new(ErrorKind::UnclosedToken, Some(chars.len() - buffer.chars().count())));
        }

        while let Some(top) = self.operators.last() {
            if matches!(top, StackEntry::OpenParen) {
                return Err(ErrorKind::UnmatchedParenthesis.into());
            }
            self.evaluate_top()?;
        }

        if self.operands.len() > 1 {
            return Err(ErrorKind::InvalidExpression.into());
        }
        self.operands.pop().ok_or_else(|| ErrorKind::InvalidExpression.into())
    }

    fn dispatch(&mut self, token: String, next: Option<char>, pos: usize) -> Result<(), Error> {
        let key = if is_unary_sign(&token, next, self.previous.as_ref()) {
            if token == "-" { "uminus".to_string() } else { "uplus".to_string() }
        } else {
            token.clone()
        };
        let props = self.registry.get(&key).ok_or(ErrorKind::InvalidExpression)?;
        trace!(key = %key, pos, "operator");

        match key.as_str() {
            "," => self.comma()?,
            "(" => self.open_paren(next)?,
            ")" => self.close_paren()?,
            _ if props.is_variable_or_constant() => {
                // constants are reduced on the spot and behave like operands
                self.operands.push(props.apply(&[])?);
                self.previous = Some(Previous::Constant(key));
                return Ok(());
            }
            _ => self.push_operator(key, props)?,
        }

        self.previous = Some(Previous::Operator(token));
        Ok(())
    }

    fn comma(&mut self) -> Result<(), Error> {
        match self.frames.last_mut() {
            Some(Frame::Call { arity, args, .. }) => {
                if let Arity::Fixed(n) = *arity {
                    if *args + 1 >= n {
                        return Err(ErrorKind::InvalidComma.into());
                    }
                }
                *args += 1;
            }
            Some(Frame::Group) | None => return Err(ErrorKind::InvalidComma.into()),
        }
        self.flush_group()?;
        self.operators.push(StackEntry::OpenParen);
        Ok(())
    }

    fn open_paren(&mut self, next: Option<char>) -> Result<(), Error> {
        let opens_call = match &self.previous {
            Some(Previous::Operator(key)) => self.registry.is_function(key),
            _ => false,
        };

        if next == Some(')') {
            let allowed = match &self.previous {
                None | Some(Previous::Operand) => false,
                Some(Previous::Constant(_)) => true,
                Some(Previous::Operator(key)) => {
                    key == "(" || opens_call || self.registry.is_variable_or_constant(key)
                }
            };
            if !allowed {
                return Err(ErrorKind::InvalidParenthesis.into());
            }
        }

        self.operators.push(StackEntry::OpenParen);
        if opens_call {
            let arity = match self.operators.iter().rev().nth(1) {
                Some(StackEntry::Operator(call)) => call.props.arity,
                _ => return Err(ErrorKind::InvalidExpression.into()),
            };
            self.frames.push(Frame::Call { arity, args: 0, base: self.operands.len() });
            // inner marker gives comma flushing a boundary of its own
            self.operators.push(StackEntry::OpenParen);
        } else if !self.frames.is_empty() {
            self.frames.push(Frame::Group);
        }
        Ok(())
    }

    fn close_paren(&mut self) -> Result<(), Error> {
        self.flush_group()?;
        match self.frames.pop() {
            Some(Frame::Call { arity, args, base }) => {
                self.flush_group()?;
                let supplied = self.operands.len().saturating_sub(base);
                let expected = match arity {
                    Arity::Fixed(n) => n,
                    Arity::Variadic => args + 1,
                };
                if supplied != args + 1 || supplied != expected {
                    return Err(ErrorKind::InvalidExpression.into());
                }
                match self.operators.last_mut() {
                    Some(StackEntry::Operator(call)) => call.operands = expected,
                    _ => return Err(ErrorKind::InvalidExpression.into()),
                }
                self.evaluate_top()
            }
            Some(Frame::Group) | None => Ok(()),
        }
    }

    fn push_operator(&mut self, key: String, props: Arc<Properties>) -> Result<(), Error> {
        while let Some(StackEntry::Operator(top)) = self.operators.last() {
            let binds_tighter = top.props.precedence > props.precedence
                || (top.props.precedence == props.precedence
                    && top.props.associativity == Associativity::Left);
            if !binds_tighter {
                break;
            }
            self.evaluate_top()?;
        }
        let operands = match props.arity {
            Arity::Fixed(n) => n,
            Arity::Variadic => 0,
        };
        self.operators.push(StackEntry::Operator(Pending { key, props, operands }));
        Ok(())
    }

    /// Pop and apply operators down to the innermost `(`, removing it.
    fn flush_group(&mut self) -> Result<(), Error> {
        loop {
            match self.operators.last() {
                Some(StackEntry::OpenParen) => {
                    self.operators.pop();
                    return Ok(());
                }
                Some(StackEntry::Operator(_)) => self.evaluate_top()?,
                None => return Err(ErrorKind::UnmatchedParenthesis.into()),
            }
        }
    }

    fn evaluate_top(&mut self) -> Result<(), Error> {
        let pending = match self.operators.pop() {
            Some(StackEntry::Operator(pending)) => pending,
            Some(StackEntry::OpenParen) => return Err(ErrorKind::UnmatchedParenthesis.into()),
            None => return Err(ErrorKind::InvalidExpression.into()),
        };
        if self.operands.len() < pending.operands {
            return Err(ErrorKind::InvalidExpression.into());
        }
        let args = self.operands.split_off(self.operands.len() - pending.operands);
        let result = pending.props.apply(&args)?;
        trace!(key = %pending.key, ?args, %result, "applied");
        self.operands.push(result);
        Ok(())
    }
}
