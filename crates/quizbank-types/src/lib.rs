//! Quizbank Types - Pure type definitions shared by the quiz services
//!
//! This crate contains only data types and payload validation, with no async
//! runtime or storage dependencies.

pub mod question;
pub mod validation;

pub use question::*;
pub use validation::*;
