//! Request handlers.
//!
//! Handlers delegate to the repositories in `qrtickets_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod tickets;
