use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::custom::CustomFunction;
use crate::error::{Error, ErrorKind};
use crate::operator::{Arity, Properties, FUNCTION_PRECEDENCE};
use crate::runtime::builtin_table;
use crate::types::Operand;

/// Lookup table of every operator, function and constant an expression may use.
///
/// Backed by a DashMap so that any number of evaluations can read it while
/// user functions are added or removed from other threads.
pub struct OperatorRegistry {
    operators: DashMap<String, Arc<Properties>>,
    predefined: HashSet<String>,
}

impl OperatorRegistry {
    /// Registry holding the built-in operators, functions and constants.
    pub fn new() -> Self {
        let operators = DashMap::new();
        let mut predefined = HashSet::new();
        for (key, props) in builtin_table() {
            operators.insert(key.to_string(), Arc::new(props));
            predefined.insert(key.to_string());
        }
        Self { operators, predefined }
    }

    pub fn get(&self, key: &str) -> Option<Arc<Properties>> {
        self.operators.get(key).map(|entry| Arc::clone(entry.value()))
    }

    pub fn is_operator(&self, key: &str) -> bool {
        self.operators.contains_key(key)
    }

    pub fn is_function(&self, key: &str) -> bool {
        self.operators.get(key).is_some_and(|p| p.is_function())
    }

    pub fn is_variable_or_constant(&self, key: &str) -> bool {
        self.operators.get(key).is_some_and(|p| p.is_variable_or_constant())
    }

    pub fn is_predefined(&self, key: &str) -> bool {
        self.predefined.contains(key)
    }

    /// Add a user function taking exactly `arity` arguments.
    ///
    /// A zero `arity` makes a constant which is evaluated as soon as it is read.
    pub fn add_function<F>(&self, name: &str, arity: usize, f: F) -> Result<(), Error>
    where
        F: Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync + 'static,
    {
        self.insert_function(name, Properties::function(Arity::Fixed(arity), FUNCTION_PRECEDENCE, f))
    }

    /// Add a user function accepting any number of arguments.
    pub fn add_variadic_function<F>(&self, name: &str, f: F) -> Result<(), Error>
    where
        F: Fn(&[Operand]) -> Result<Operand, Error> + Send + Sync + 'static,
    {
        self.insert_function(name, Properties::function(Arity::Variadic, FUNCTION_PRECEDENCE, f))
    }

    /// Register a `CustomFunction` implementation under its own name.
    pub fn register(&self, function: Box<dyn CustomFunction>) -> Result<(), Error> {
        let name = function.name().to_string();
        let props = Properties::function(function.arity(), FUNCTION_PRECEDENCE, move |args| function.execute(args));
        self.insert_function(&name, props)
    }

    fn insert_function(&self, name: &str, props: Properties) -> Result<(), Error> {
        if !is_valid_name(name, true) {
            return Err(ErrorKind::InvalidFunctionName(name.to_string()).into());
        }
        if self.is_predefined(name) {
            return Err(ErrorKind::PredefinedOverride(name.to_string()).into());
        }
        debug!(name, arity = ?props.arity, "registering function");
        self.operators.insert(name.to_string(), Arc::new(props));
        Ok(())
    }

    /// Remove a user function. Built-ins cannot be removed.
    pub fn remove_function(&self, name: &str) -> Result<(), Error> {
        if !is_valid_name(name, false) {
            return Err(ErrorKind::InvalidFunctionName(name.to_string()).into());
        }
        if !self.is_function(name) {
            return Err(ErrorKind::FunctionNotFound(name.to_string()).into());
        }
        if self.is_predefined(name) {
            return Err(ErrorKind::PredefinedRemoval(name.to_string()).into());
        }
        match self.operators.remove_if(name, |_, p| p.is_function()) {
            Some(_) => {
                debug!(name, "removed function");
                Ok(())
            }
            None => Err(ErrorKind::FunctionNotFound(name.to_string()).into()),
        }
    }

    /// All registered keys, sorted lexicographically.
    pub fn operator_list(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.operators.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Names are ASCII letters and digits. New functions also need a leading
/// letter and at least two characters.
fn is_valid_name(name: &str, strict: bool) -> bool {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    !strict || (name.len() >= 2 && name.starts_with(|c: char| c.is_ascii_alphabetic()))
}
