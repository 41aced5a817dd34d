//! Whole-function analyses run on demand: execution order, symbol
//! visibility and validation.

mod planner;
mod scope;
mod validator;

pub use planner::ExecutionPlanner;
pub use scope::{ScopeResolver, SymbolInfo, SymbolOrigin};
pub use validator::{FunctionValidator, FunctionValidatorBuilder};
