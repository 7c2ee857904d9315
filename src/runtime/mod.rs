pub mod arithmetic;
pub mod builtin_functions;
pub mod evaluator;
pub mod rounding;

// Re-export the main public items
pub use builtin_functions::builtin_table;
pub use evaluator::Evaluator;
pub use rounding::round_half_up;
