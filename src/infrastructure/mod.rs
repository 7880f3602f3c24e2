//! Infrastructure layer: content sources and DI container
//!
//! This layer implements the collaborator traits and wires up the controller.

pub mod di;
pub mod error;
pub mod localization;
pub mod markup;
pub mod registry;
pub mod traits;

pub use error::{InfraError, InfraResult};
