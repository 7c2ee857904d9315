use crate::operator::{Arity, Properties, CONSTANT_PRECEDENCE, FUNCTION_PRECEDENCE};
use crate::types::{Associativity, Operand};

fn arg(ops: &[Operand], i: usize) -> f64 {
    ops.get(i).map_or(f64::NAN, |o| o.to_f64())
}

fn binary(precedence: u8, associativity: Associativity, f: fn(&[Operand]) -> Operand) -> Properties {
    Properties::builtin(2, precedence, associativity, f)
}

fn sign(f: fn(&[Operand]) -> Operand) -> Properties {
    Properties::builtin(1, FUNCTION_PRECEDENCE, Associativity::No, f)
}

fn unary(f: fn(f64) -> f64) -> Properties {
    Properties::function(
        Arity::Fixed(1),
        FUNCTION_PRECEDENCE,
        move |ops| Ok(Operand::new(f(arg(ops, 0)))),
    )
}

fn dyadic(f: fn(f64, f64) -> f64) -> Properties {
    Properties::function(
        Arity::Fixed(2),
        FUNCTION_PRECEDENCE,
        move |ops| Ok(Operand::new(f(arg(ops, 0), arg(ops, 1)))),
    )
}

fn constant(f: fn() -> f64) -> Properties {
    Properties::function(
        Arity::Fixed(0),
        CONSTANT_PRECEDENCE,
        move |_| Ok(Operand::new(f())),
    )
}

/// Structural markers and the arithmetic operators.
pub fn operators() -> Vec<(&'static str, Properties)> {
    vec![
        ("(", Properties::marker()),
        (")", Properties::marker()),
        (",", Properties::marker()),
        ("+", binary(1, Associativity::Left, |ops| Operand::new(arg(ops, 0) + arg(ops, 1)))),
        ("-", binary(1, Associativity::Left, |ops| Operand::new(arg(ops, 0) - arg(ops, 1)))),
        ("*", binary(2, Associativity::Left, |ops| Operand::new(arg(ops, 0) * arg(ops, 1)))),
        ("/", binary(2, Associativity::Left, |ops| Operand::new(arg(ops, 0) / arg(ops, 1)))),
        ("%", binary(2, Associativity::Left, |ops| Operand::new(arg(ops, 0) % arg(ops, 1)))),
        ("^", binary(3, Associativity::Right, |ops| Operand::new(arg(ops, 0).powf(arg(ops, 1))))),
        ("uminus", sign(|ops| Operand::new(-arg(ops, 0)))),
        ("uplus", sign(|ops| Operand::new(arg(ops, 0)))),
    ]
}

/// Named math functions and constants.
pub fn functions() -> Vec<(&'static str, Properties)> {
    vec![
        ("abs", unary(f64::abs)),
        ("sin", unary(f64::sin)),
        ("cos", unary(f64::cos)),
        ("tan", unary(f64::tan)),
        ("asin", unary(f64::asin)),
        ("acos", unary(f64::acos)),
        ("atan", unary(f64::atan)),
        ("sinh", unary(f64::sinh)),
        ("cosh", unary(f64::cosh)),
        ("tanh", unary(f64::tanh)),
        ("asinh", unary(f64::asinh)),
        ("acosh", unary(f64::acosh)),
        ("atanh", unary(f64::atanh)),
        ("deg", unary(f64::to_degrees)),
        ("rad", unary(f64::to_radians)),
        ("round", unary(round_to_integer)),
        ("floor", unary(f64::floor)),
        ("ceil", unary(f64::ceil)),
        ("ln", unary(f64::ln)),
        ("log10", unary(f64::log10)),
        ("log", dyadic(|value, base| value.ln() / base.ln())),
        ("sqrt", unary(f64::sqrt)),
        ("cbrt", unary(f64::cbrt)),
        ("fact", unary(factorial)),
        ("max", dyadic(f64::max)),
        ("min", dyadic(f64::min)),
        (
            "mean",
            Properties::function(
                Arity::Variadic,
                FUNCTION_PRECEDENCE,
                |ops| {
                    let sum: f64 = ops.iter().map(|o| o.to_f64()).sum();
                    Ok(Operand::new(sum / ops.len() as f64))
                },
            ),
        ),
        ("rand", constant(rand::random::<f64>)),
        ("pi", constant(|| std::f64::consts::PI)),
        ("e", constant(|| std::f64::consts::E)),
    ]
}

/// Nearest integer, halves towards positive infinity. `x - floor(x)` is exact,
/// unlike `x + 0.5`.
fn round_to_integer(x: f64) -> f64 {
    let r = x.floor();
    if x - r >= 0.5 { r + 1.0 } else { r }
}

/// `x!` generalised through the gamma function; exact for small whole numbers.
pub fn factorial(x: f64) -> f64 {
    // poles of the gamma function
    if x < 0.0 && x.fract() == 0.0 {
        return f64::NAN;
    }
    if x.fract() == 0.0 && (0.0..=170.0).contains(&x) {
        return (1..=x as u32).fold(1.0, |acc, k| acc * k as f64);
    }
    gamma(x + 1.0)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

pub fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        // reflection formula
        return std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x));
    }
    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let series = LANCZOS
        .iter()
        .enumerate()
        .skip(1)
        .fold(LANCZOS[0], |acc, (i, c)| acc + c / (x + i as f64));
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
}
