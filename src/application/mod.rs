//! Application layer: the guidebook controller and its view state
//!
//! This layer orchestrates domain logic and depends on the collaborator traits.

pub mod controller;
pub mod error;
pub mod error_ext;
pub mod view;

pub use controller::{Collaborators, GuidebookController};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use view::{GuideView, SplitResizeMode};
