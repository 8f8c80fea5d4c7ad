//! Live Room Gateway Library
//!
//! Session gateway between a chat backend and a local store of participants.
//! The HTTP server binary is in `src/main.rs`.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod store;
