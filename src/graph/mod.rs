//! The node-and-port graph behind the visual logic builder.
//!
//! This family is kept apart from the statement flow graph in
//! [`crate::function`]: nodes here are typed by a registry definition and wired
//! port to port, with no notion of scope.

pub mod builtin;
mod definition;
mod instance;
mod logic_graph;
mod port;
mod registry;
mod service;

pub use definition::{NodeBehavior, NodeDefinition};
pub use instance::{LogicConnection, NodeInstance};
pub use logic_graph::{LogicGraph, LogicGraphMeta};
pub use port::{LogicPortDefinition, PortChannel, PortKind, PortSide};
pub use registry::NodeDefinitionRegistry;
pub use service::{LogicGraphService, LogicGraphServiceBuilder};
