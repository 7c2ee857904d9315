use crate::operator::Properties;
use super::arithmetic;

/// Every predefined operator, function and constant, keyed by its token.
pub fn builtin_table() -> Vec<(&'static str, Properties)> {
    let mut table = arithmetic::operators();
    table.extend(arithmetic::functions());
    table
}
