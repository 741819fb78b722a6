//! Shared data contracts for mcpman.
//!
//! This crate holds the pure data shapes the rest of the workspace agrees on:
//!
//! - [`ServerRecord`] - one user-configured remote endpoint definition
//! - [`Method`] - the HTTP methods a call may use
//! - [`ApiResponse`] / [`ResponseBody`] - the uniform shape of a completed call
//! - [`CallError`] / [`UnreachableKind`] - the tagged outcome for calls that
//!   produced no HTTP response at all
//!
//! No I/O happens here. Persistence lives in `mcpman-registry`, transport in
//! `mcpman-client`.

mod outcome;
mod request;
mod response;
mod server;

pub use outcome::{CallError, UnreachableKind};
pub use request::{Method, UnknownMethod};
pub use response::{ApiResponse, ResponseBody};
pub use server::{ServerRecord, ValidationIssue};
