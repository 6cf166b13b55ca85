//! Core domain types
//!
//! Shapes of the data returned by the homework status API, and the checks
//! that turn raw JSON into them.

pub mod homework;
pub mod response;
