//! WingMentor — the Wingman aviation assistant relay and its chat host.

pub mod agent;
pub mod channels;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod wingman;
