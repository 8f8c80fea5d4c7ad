//! API module
//!
//! Contains HTTP request handlers for session and room endpoints

pub mod rooms;
pub mod session;
pub mod utils;
