//! Interpreter for the portfolio's simulated shell.
//!
//! [`session::Session`] is the entry point: it owns the per-terminal state and
//! feeds each submitted line through the fixed command table in [`commands`].

pub mod boot;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod mockfs;
pub mod network;
pub mod session;
pub mod tables;
