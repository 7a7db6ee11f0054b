//! Data models
//!
//! Wire types of the reward service API. Field names are camelCase on the
//! wire; ids are opaque strings assigned by the service.

pub mod category;
pub mod content;
pub mod media;
pub mod participant;
pub mod reward;

// Re-exports
pub use category::*;
pub use content::*;
pub use media::*;
pub use participant::*;
pub use reward::*;
