//! Session module
//!
//! The session gateway and the single-shot streams it hands back.

pub mod error;
pub mod gateway;
pub mod single_shot;

pub use error::GatewayError;
pub use gateway::SessionGateway;
pub use single_shot::SingleShot;
