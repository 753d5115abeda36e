//! Core components of the `bankfind-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`BankClient`] and its builder.
//! - The primary [`BankError`] type.
//! - Shared BankFind request plumbing and lenient wire helpers.

/// The main client (`BankClient`), builder, and configuration.
pub mod client;
/// The primary error type (`BankError`) for the crate.
pub mod error;
pub(crate) mod fdic;
pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::BankClient`
pub use client::{BankClient, BankClientBuilder, CacheMode};
pub use error::BankError;
