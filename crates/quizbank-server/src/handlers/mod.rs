//! HTTP handlers

pub mod health;
pub mod questions;

pub use health::health;
