//! Core types and trait definitions for the DSAR request tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::RequestStore`]; text-generation
//! backends implement [`summary::SummaryGenerator`]. The
//! [`service::RequestService`] ties the two together.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod request;
pub mod service;
pub mod status;
pub mod store;
pub mod summary;

pub use error::{Error, Result};
pub use request::{CreateRequest, DataRequest, NewDataRequest, RequestType};
pub use service::RequestService;
pub use status::Status;
