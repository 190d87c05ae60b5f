//! Wingman — the aviation assistant behind the WingMentor chat panel.
//!
//! The relay frames each query with the Wingman persona, sends it to the
//! configured text-generation provider, and turns every outcome into a
//! string the chat panel can render directly.

pub mod prompts;
pub mod relay;

pub use prompts::frame_prompt;
pub use relay::{
    COMMUNICATION_FAILURE_REPLY, NOT_CONFIGURED_REPLY, UNPROCESSED_REPLY, WingmanRelay,
};
