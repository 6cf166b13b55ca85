//! Scheduler layer for the bot
//!
//! This layer drives the fixed-period poll loop: fetch, validate, notify,
//! sleep, repeat.

pub mod poller;

pub use poller::StatusPoller;
