//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing Property Scout
//! without reaching the real Serper, Browserless or Hugging Face APIs.

pub mod mocks;

pub use mocks::*;
