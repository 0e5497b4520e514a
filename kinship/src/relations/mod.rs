//! Inverse-type resolution and forward/reverse edge synchronization

pub mod resolver;
pub mod synchronizer;

pub use resolver::resolve_inverse;
pub use synchronizer::{Caller, EdgeChanges, RelationshipSynchronizer, Role};
