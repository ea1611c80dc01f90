//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: the process-wide HTTP client shared by every source

mod http;

pub use http::HttpClient;
