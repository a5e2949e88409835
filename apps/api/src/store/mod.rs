// Document Store: the portfolio document of record, its path-addressed
// mutator and the durable override entry.

pub mod demo;
pub mod document;
pub mod handlers;
pub mod path;
pub mod persist;
pub mod validate;

pub use document::{DocumentStore, StoreError, OVERRIDE_KEY};
pub use path::{EditPath, EditValue, PathError};
pub use persist::{build_durable_store, DurableStore};
