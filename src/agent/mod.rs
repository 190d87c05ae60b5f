//! Agent module — command parsing and the chat loop.

pub mod agent_loop;
pub mod submission;

pub use agent_loop::{Agent, ShutdownHandle};
pub use submission::{Submission, SubmissionParser};
