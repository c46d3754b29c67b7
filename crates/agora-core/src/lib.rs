//! # Agora Core
//!
//! The domain layer of the Agora link-aggregation backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the post ranking engine, voting rules, and the ports infrastructure must implement.

pub mod domain;
pub mod error;
pub mod ports;
pub mod ranking;
pub mod services;

pub use error::{DomainError, RepoError};
pub use ranking::{Rankable, SortMode};
