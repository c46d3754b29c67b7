//! # Agora Shared
//!
//! Wire types shared between the feed server and its clients.
//! Enumerations such as the vote direction reuse the `agora-core` types directly.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
