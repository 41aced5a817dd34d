//! Opaque string identifiers and the generators that mint them.
//!
//! Every id kind is a distinct newtype over `String`, so a `StatementId` can
//! never be handed to an API expecting an `EdgeId`. Equality is plain string
//! equality; uniqueness is the job of whichever collection owns the entity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Defines one string newtype per id kind, with the conversions every kind shares.
macro_rules! define_ids {
    ( $( $(#[$meta:meta])* $name:ident ),* $(,)? ) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(String);

            impl $name {
                pub fn new(id: impl Into<String>) -> Self {
                    Self(id.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<&str> for $name {
                fn from(id: &str) -> Self {
                    Self(id.to_string())
                }
            }

            impl From<String> for $name {
                fn from(id: String) -> Self {
                    Self(id)
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            // Hash of a single-field newtype equals the hash of the field, so
            // map lookups by `&str` stay consistent.
            impl Borrow<str> for $name {
                fn borrow(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

define_ids! {
    /// Identity of a function inside a workspace.
    FunctionId,
    /// Identity of a statement inside one function.
    StatementId,
    /// Identity of a function parameter.
    ParamId,
    /// Identity of a flow edge between two statements.
    EdgeId,
    /// Key of a node definition in the registry.
    NodeTypeId,
    /// Identity of a placed node in a logic graph.
    NodeInstanceId,
    /// Identity of a port on a node definition.
    PortId,
    /// Identity of a connection between two node ports.
    ConnectionId,
}

/// Source of fresh identifiers for the command façades.
///
/// `prefix` names the kind of entity being created (`"stmt"`, `"edge"`, ...).
/// Implementations may ignore it.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, prefix: &str) -> String;
}

/// Random UUID v4 ids. The default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self, _prefix: &str) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` ids, counting from 1 across all prefixes.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self, prefix: &str) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", prefix, n)
    }
}
