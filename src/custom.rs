use crate::error::Error;
use crate::operator::Arity;
use crate::types::Operand;

/// Trait for implementing custom functions in shunt
///
/// # Example
/// ```rust
/// use shunt::custom::CustomFunction;
/// use shunt::{Arity, Error, Operand};
///
/// struct SimpleInterest;
///
/// impl CustomFunction for SimpleInterest {
///     fn name(&self) -> &str { "si" }
///     fn arity(&self) -> Arity { Arity::Fixed(3) }
///
///     fn execute(&self, args: &[Operand]) -> Result<Operand, Error> {
///         let (p, r, t) = (args[0].to_f64(), args[1].to_f64(), args[2].to_f64());
///         Ok(Operand::new(p * r * t / 100.0))
///     }
/// }
/// ```
pub trait CustomFunction: Send + Sync {
    /// The name used in expressions (case-sensitive)
    fn name(&self) -> &str;

    /// Number of arguments; `Arity::Fixed(0)` registers a constant
    fn arity(&self) -> Arity;

    /// Execute the function with arguments in call order
    fn execute(&self, args: &[Operand]) -> Result<Operand, Error>;

    /// Optional: Description of the function for documentation
    fn description(&self) -> Option<&str> { None }
}
