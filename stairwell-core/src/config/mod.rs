//! Configuration types
//!
//! Board-agnostic configuration: the option model, the key/value source the
//! host provides, and resolution of raw options into a validated
//! [`ModuleConfig`].

pub mod options;
pub mod source;
pub mod types;

pub use options::*;
pub use source::*;
pub use types::*;
