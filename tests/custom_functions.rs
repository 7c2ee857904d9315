use shunt::{
    add_function, add_variadic_function, evaluate, operator_list, register_function, remove_function,
    Arity, CustomFunction, Error, ErrorKind, Operand,
};
use std::sync::Mutex;

// Global test mutex to prevent concurrent access to the global operator registry
static TEST_MUTEX: Mutex<()> = Mutex::new(());

/// Simple interest: principal * rate * time / 100
struct SimpleInterest;

impl CustomFunction for SimpleInterest {
    fn name(&self) -> &str { "si" }
    fn arity(&self) -> Arity { Arity::Fixed(3) }

    fn execute(&self, args: &[Operand]) -> Result<Operand, Error> {
        let (p, r, t) = (args[0].to_f64(), args[1].to_f64(), args[2].to_f64());
        Ok(Operand::new(p * r * t / 100.0))
    }

    fn description(&self) -> Option<&str> { Some("Simple interest") }
}

/// Rejects negative input to exercise error propagation out of a function
struct CheckedSqrt;

impl CustomFunction for CheckedSqrt {
    fn name(&self) -> &str { "csqrt" }
    fn arity(&self) -> Arity { Arity::Fixed(1) }

    fn execute(&self, args: &[Operand]) -> Result<Operand, Error> {
        let x = args[0].to_f64();
        if x < 0.0 {
            return Err(Error::function("csqrt expects a non-negative number"));
        }
        Ok(Operand::new(x.sqrt()))
    }
}

#[test]
fn test_custom_function_registration() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let _ = remove_function("si");

    assert!(register_function(Box::new(SimpleInterest)).is_ok());
    assert_eq!(evaluate("si(1000, 5, 2)").unwrap(), 100.0);
    assert_eq!(evaluate("si(1000, 5, 2) / 4 + 1").unwrap(), 26.0);
    assert!(operator_list().contains(&"si".to_string()));

    // Clean up
    remove_function("si").unwrap();
    assert!(evaluate("si(1000, 5, 2)").is_err());
}

#[test]
fn test_custom_function_argument_count() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let _ = remove_function("si");
    register_function(Box::new(SimpleInterest)).unwrap();

    assert_eq!(evaluate("si(1, 2, 3, 4)").unwrap_err().kind, ErrorKind::InvalidComma);
    assert_eq!(evaluate("si(1, 2)").unwrap_err().kind, ErrorKind::InvalidExpression);

    remove_function("si").unwrap();
}

#[test]
fn test_closure_functions() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let _ = remove_function("hyp");
    let _ = remove_function("total");

    add_function("hyp", 2, |ops| Ok(Operand::new(ops[0].to_f64().hypot(ops[1].to_f64())))).unwrap();
    add_variadic_function("total", |ops| Ok(Operand::new(ops.iter().map(|o| o.to_f64()).sum()))).unwrap();

    assert_eq!(evaluate("hyp(3, 4)").unwrap(), 5.0);
    assert_eq!(evaluate("total(1, 2, 3, 4, 5)").unwrap(), 15.0);
    assert_eq!(evaluate("total(hyp(3, 4), (1 + 1))").unwrap(), 7.0);

    remove_function("hyp").unwrap();
    remove_function("total").unwrap();
}

#[test]
fn test_user_constant() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let _ = remove_function("answer");

    add_function("answer", 0, |_| Ok(Operand::new(42.0))).unwrap();
    assert_eq!(evaluate("answer").unwrap(), 42.0);
    assert_eq!(evaluate("answer / 2 - 1").unwrap(), 20.0);
    assert_eq!(evaluate("answer()").unwrap(), 42.0);

    remove_function("answer").unwrap();
}

#[test]
fn test_function_errors_propagate() {
    let _lock = TEST_MUTEX.lock().unwrap();
    let _ = remove_function("csqrt");
    register_function(Box::new(CheckedSqrt)).unwrap();

    assert_eq!(evaluate("csqrt(16)").unwrap(), 4.0);
    let err = evaluate("1 + csqrt(-4)").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Function("csqrt expects a non-negative number".to_string()));

    remove_function("csqrt").unwrap();
}

#[test]
fn test_predefined_functions_are_protected() {
    let _lock = TEST_MUTEX.lock().unwrap();

    let err = add_function("sin", 1, |ops| Ok(ops[0])).unwrap_err();
    assert_eq!(err.kind, ErrorKind::PredefinedOverride("sin".to_string()));
    let err = remove_function("mean").unwrap_err();
    assert_eq!(err.kind, ErrorKind::PredefinedRemoval("mean".to_string()));
    let err = remove_function("nosuchfn").unwrap_err();
    assert_eq!(err.kind, ErrorKind::FunctionNotFound("nosuchfn".to_string()));
    let err = add_function("2fast", 1, |ops| Ok(ops[0])).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidFunctionName("2fast".to_string()));

    // built-ins still work
    assert_eq!(evaluate("sin(0)").unwrap(), 0.0);
}
