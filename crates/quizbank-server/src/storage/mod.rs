//! Storage layer
//!
//! SQLite through sqlx. One [`DbSession`] (a transaction on a pooled
//! connection) is opened per request.

pub mod db;
pub mod questions;
pub mod schema;

pub use db::{Database, DbSession};
pub use schema::Schema;
