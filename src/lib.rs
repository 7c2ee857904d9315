pub mod config;
pub mod custom;
pub mod error;
pub mod lexer;
pub mod operator;
pub mod registry;
pub mod runtime;
pub mod types;

pub use config::Config;
pub use custom::CustomFunction;
pub use error::{Error, ErrorKind};
pub use operator::{Arity, Properties};
pub use registry::OperatorRegistry;
pub use runtime::Evaluator;
pub use types::{Associativity, Operand};

// Global operator registry
lazy_static::lazy_static! {
    static ref GLOBAL_REGISTRY: OperatorRegistry = OperatorRegistry::new();
}

/// The process-wide registry used by `evaluate` and the function helpers below.
pub fn global_registry() -> &'static OperatorRegistry {
    &GLOBAL_REGISTRY
}

/// Evaluate an infix math expression to f64, rounded to 10 decimal places.
pub fn evaluate(input: &str) -> Result<f64, Error> {
    Evaluator::new(&GLOBAL_REGISTRY).evaluate(input)
}

/// Evaluate against a specific registry and configuration.
pub fn evaluate_with(input: &str, registry: &OperatorRegistry, config: &Config) -> Result<f64, Error> {
    Evaluator::with_config(registry, *config).evaluate(input)
}

/// Add a user function with a fixed number of arguments globally
pub fn add_function<F>(name: &str, arity: usize, f: F) -> Result<(), Error>
where
    F: Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY.add_function(name, arity, f)
}

/// Add a user function taking any number of arguments globally
pub fn add_variadic_function<F>(name: &str, f: F) -> Result<(), Error>
where
    F: Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY.add_variadic_function(name, f)
}

/// Register a custom function globally
pub fn register_function(function: Box<dyn CustomFunction>) -> Result<(), Error> {
    GLOBAL_REGISTRY.register(function)
}

/// Remove a user function by name
pub fn remove_function(name: &str) -> Result<(), Error> {
    GLOBAL_REGISTRY.remove_function(name)
}

/// List every operator, function and constant, sorted by name
pub fn operator_list() -> Vec<String> {
    GLOBAL_REGISTRY.operator_list()
}
