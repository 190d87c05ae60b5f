//! Chat panel state: transcript and input guarding around the Wingman relay.

pub mod model;
pub mod session;

pub use model::{ChatEntry, Speaker};
pub use session::ChatSession;
