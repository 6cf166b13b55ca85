//! Homework Core
//!
//! Core types and rules for the homework status bot.
//!
//! This crate contains:
//! - Domain types: submission records and review status codes
//! - Response validation for the homework status API
//! - Notification rendering
//!
//! Nothing here performs I/O; fetching and sending live in `homework-client`.

pub mod domain;
pub mod error;
pub mod notification;

pub use domain::homework::{HomeworkStatus, Submission};
pub use domain::response::{current_date, validate_response};
pub use error::{Result, StatusError};
pub use notification::{error_notification, render_notification};
