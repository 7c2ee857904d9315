use crate::registry::OperatorRegistry;
use crate::types::Operand;

/// Outcome of feeding one more character to the pending token buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Buffer plus character is a complete operator, function or constant key.
    Operator(String),
    /// Buffer plus character is a complete numeric literal.
    Operand(String),
    /// Keep accumulating.
    Pending,
}

/// The last token the evaluator dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum Previous {
    Operand,
    /// A zero-argument function or constant, already reduced to a value.
    Constant(String),
    /// Any other registry key, as typed (`-` rather than `uminus`).
    Operator(String),
}

/// Drop whitespace, except that a run directly before a digit or `.` becomes
/// a single space so adjacent numbers are never glued together.
pub fn normalize(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut pending_space = false;
    for c in expr.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && (c.is_ascii_digit() || c == '.') {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Decide whether `buffer` followed by `ch` forms a complete token, looking at
/// most one character ahead.
pub fn classify(registry: &OperatorRegistry, buffer: &str, ch: char, next: Option<char>) -> Classification {
    let mut candidate = String::with_capacity(buffer.len() + ch.len_utf8());
    candidate.push_str(buffer);
    candidate.push(ch);

    if completes_operator(registry, &candidate, next) {
        Classification::Operator(candidate)
    } else if completes_operand(&candidate, next) {
        Classification::Operand(candidate)
    } else {
        Classification::Pending
    }
}

fn completes_operator(registry: &OperatorRegistry, candidate: &str, next: Option<char>) -> bool {
    // the unary forms are produced by the evaluator, never typed
    if !registry.is_operator(candidate) || candidate == "uplus" || candidate == "uminus" {
        return false;
    }
    let constant_at_end = next.is_none() && registry.is_variable_or_constant(candidate);
    let next_breaks = next.is_some_and(|c| {
        let key = c.to_string();
        registry.is_operator(&key) && !registry.is_function(&key)
    });
    constant_at_end || next_breaks || !registry.is_function(candidate) || next == Some('(')
}

fn completes_operand(candidate: &str, next: Option<char>) -> bool {
    if !Operand::is_operand(candidate) || matches!(next, Some('e' | 'E')) {
        return false;
    }
    match next {
        None => true,
        Some(c) => {
            let mut longer = String::with_capacity(candidate.len() + c.len_utf8());
            longer.push_str(candidate);
            longer.push(c);
            !Operand::is_operand(&longer)
        }
    }
}

/// A `+` or `-` is a sign rather than a binary operator when it opens the
/// expression or follows any operator other than `)`.
pub fn is_unary_sign(token: &str, next: Option<char>, previous: Option<&Previous>) -> bool {
    if !matches!(token, "+" | "-") || next == Some(' ') {
        return false;
    }
    match previous {
        None => true,
        Some(Previous::Operator(key)) => key != ")",
        Some(Previous::Operand) | Some(Previous::Constant(_)) => false,
    }
}
