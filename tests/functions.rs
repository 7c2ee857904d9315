use shunt::evaluate;

fn approx(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn nested_single_argument_calls() {
    assert_eq!(evaluate("deg(asin(sin(rad(30))))").unwrap(), 30.0);
    assert_eq!(evaluate("abs(floor(-2.5))").unwrap(), 3.0);
    assert_eq!(evaluate("sqrt(cbrt(64))").unwrap(), 2.0);
}

#[test]
fn trigonometry() {
    assert_eq!(evaluate("sin(0)").unwrap(), 0.0);
    assert_eq!(evaluate("cos(pi)").unwrap(), -1.0);
    assert_eq!(evaluate("tan(rad(45))").unwrap(), 1.0);
    assert_eq!(evaluate("deg(acos(0))").unwrap(), 90.0);
    assert_eq!(evaluate("deg(atan(1))").unwrap(), 45.0);
    assert_eq!(evaluate("cosh(0) + sinh(0) + tanh(0)").unwrap(), 1.0);
    assert_eq!(evaluate("asinh(sinh(2))").unwrap(), 2.0);
    assert_eq!(evaluate("acosh(cosh(2))").unwrap(), 2.0);
    assert_eq!(evaluate("atanh(tanh(0.5))").unwrap(), 0.5);
}

#[test]
fn logarithms_and_roots() {
    assert_eq!(evaluate("ln(e)").unwrap(), 1.0);
    assert_eq!(evaluate("log10(1000)").unwrap(), 3.0);
    assert_eq!(evaluate("log(81, 3)").unwrap(), 4.0);
    assert_eq!(evaluate("sqrt(16) + cbrt(27)").unwrap(), 7.0);
}

#[test]
fn rounding_functions() {
    assert_eq!(evaluate("round(2.5)").unwrap(), 3.0);
    assert_eq!(evaluate("round(-2.5)").unwrap(), -2.0);
    assert_eq!(evaluate("round(4503599627370497)").unwrap(), 4503599627370497.0);
    assert_eq!(evaluate("round(0.49999999999999994)").unwrap(), 0.0);
    assert_eq!(evaluate("floor(2.7)").unwrap(), 2.0);
    assert_eq!(evaluate("ceil(2.1)").unwrap(), 3.0);
}

#[test]
fn factorial() {
    assert_eq!(evaluate("fact(5)").unwrap(), 120.0);
    assert_eq!(evaluate("fact(0)").unwrap(), 1.0);
    assert!(approx(evaluate("fact(0.5)").unwrap(), 0.8862269255));
    assert!(evaluate("fact(-1)").unwrap().is_nan());
    assert!(evaluate("fact(-2)").unwrap().is_nan());
}

#[test]
fn two_argument_functions() {
    assert_eq!(evaluate("max(3, 9)").unwrap(), 9.0);
    assert_eq!(evaluate("min(3, 9)").unwrap(), 3.0);
    assert_eq!(evaluate("max(1 + 2, 2 * 2)").unwrap(), 4.0);
    assert_eq!(evaluate("2 * max(1, 2) ^ 2").unwrap(), 8.0);
}

#[test]
fn variadic_mean() {
    assert_eq!(evaluate("mean(1,2,3,4)").unwrap(), 2.5);
    assert_eq!(evaluate("mean(7)").unwrap(), 7.0);
    assert_eq!(evaluate("mean(1, mean(2, 4), 5 * 2)").unwrap(), 4.6666666667);
    assert_eq!(evaluate("mean(-1, -2, -3)").unwrap(), -2.0);
}

#[test]
fn plain_groups_inside_calls() {
    assert_eq!(evaluate("(1+2)*(3+4)").unwrap(), 21.0);
    assert_eq!(evaluate("max((1+2),3)").unwrap(), 3.0);
    assert_eq!(evaluate("max((1+2)*2,(3))").unwrap(), 6.0);
    assert_eq!(evaluate("mean((1), ((2)), (3 + (4 - 1)))").unwrap(), 3.0);
    assert_eq!(evaluate("sin((0))").unwrap(), 0.0);
}

#[test]
fn random_values() {
    for _ in 0..50 {
        assert_eq!(evaluate("floor(-rand)").unwrap(), -1.0);
        assert_eq!(evaluate("floor(rand())").unwrap(), 0.0);
        let r = evaluate("rand").unwrap();
        assert!((0.0..=1.0).contains(&r));
    }
}

#[test]
fn constants() {
    assert_eq!(evaluate("pi").unwrap(), 3.1415926536);
    assert_eq!(evaluate("e").unwrap(), 2.7182818285);
    assert_eq!(evaluate("2*pi").unwrap(), 6.2831853072);
}
