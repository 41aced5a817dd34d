//! # logic-graph - Visual Logic Graph Engine
//!
//! **logic-graph** is the in-memory domain model behind a visual,
//! node-and-port programming surface. A program is a set of *functions*, each
//! made of parameters, statements and the flow edges that order them. The
//! engine resolves execution order, works out which symbols each statement can
//! see, validates the whole function on demand and evaluates a small,
//! sandboxed expression language to preview values while the user edits.
//!
//! ## Two graph families
//!
//! - [`function`]: statements (variable, logic, return) connected by flow
//!   edges, with lexical scoping along those edges.
//! - [`graph`]: typed nodes from a [`graph::NodeDefinitionRegistry`] wired
//!   port to port, used by the drag-and-drop builder.
//!
//! ## Two tiers of checks
//!
//! Every mutation enforces the cheap structural rules of its aggregate and
//! fails with an [`error::InvariantError`], leaving the aggregate untouched.
//! Whole-graph properties (acyclicity, name uniqueness, references) are only
//! checked when [`analysis::FunctionValidator::validate`] or the planner runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logic_graph::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = FunctionStore::builder()
//!         .id_generator(std::sync::Arc::new(SequentialIdGenerator::new()))
//!         .build();
//!     let id = store.create_function("checkout")?;
//!
//!     // 1. Describe the function body.
//!     let mut editor = store.edit(&id)?;
//!     editor.add_param("price")?;
//!     editor.add_param("taxRate")?;
//!     let tax = editor.add_variable("tax", ValueSource::expression("price * taxRate"))?;
//!     let total = editor.add_variable("total", ValueSource::expression("price + tax"))?;
//!     let ret = editor.set_return(ValueSource::symbol_ref("total"))?;
//!     editor.connect_flow(&tax, &total)?;
//!     editor.connect_flow(&total, &ret)?;
//!
//!     // 2. Validate and preview.
//!     let inspector = store.inspect(&id)?;
//!     inspector.validate()?;
//!
//!     let mut inputs = Scope::new();
//!     inputs.insert("price".to_string(), Value::from(100.0));
//!     inputs.insert("taxRate".to_string(), Value::from(0.08));
//!     let preview = inspector.runtime_values(&inputs);
//!     println!("total = {:?}", preview.return_value);
//!
//!     // 3. Persist as a snapshot.
//!     let json = inspector.snapshot().to_json()?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod analysis;
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod function;
pub mod graph;
pub mod id;
pub mod prelude;
pub mod store;
