//! Request/response engine between the presentation layer and storage.
//!
//! # Responsibility
//! - Accept one [`Request`] at a time and answer with its [`Response`] list.
//! - Own the database connection so callers never touch SQL or handles.
//!
//! # Invariants
//! - Every search/load/save request yields at least one response.
//! - All responses for a request are produced before `process` returns.

mod processor;
mod request;
mod response;

pub use processor::RequestProcessor;
pub use request::Request;
pub use response::Response;
