//! # Posts Core
//!
//! The domain layer of the posts service.
//! This crate contains the post model and the store ports, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
