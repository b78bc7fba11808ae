//! chart-components: component registry and option-merging engine.
//!
//! Turns a partially specified chart document into resolved component
//! models: classes are looked up by `main.sub` type, main types are built in
//! dependency order, and every option is merged over theme and class
//! defaults without clobbering what the user wrote.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod telemetry;

pub use api::{ComponentModel, ComponentRegistry, GlobalModel, GlobalModelConfig};
pub use error::{ComponentError, ComponentResult};
