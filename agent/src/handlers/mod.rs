//! HTTP request handlers for the agent server

pub mod actions;
pub mod discovery;
pub mod health;
pub mod messages;
pub mod openai;
