//! Command/query façades, snapshots and the runtime preview.

mod editor;
mod inspector;
mod runtime;
mod service;
mod snapshot;
mod workspace;

pub use editor::FunctionEditor;
pub use inspector::FunctionInspector;
pub use runtime::{
    PLAN_ERROR_KEY, RETURN_KEY, RuntimeValues, compute_return_value, compute_runtime_values,
};
pub use service::FunctionService;
pub use snapshot::{FunctionSnapshot, SNAPSHOT_VERSION};
pub use workspace::{FunctionStore, FunctionStoreBuilder, FunctionWorkspace};
