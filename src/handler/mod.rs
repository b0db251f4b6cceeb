//! Request handler module
//!
//! Entry point for HTTP request processing: method validation, route
//! lookup, template rendering, and response selection.

mod dispatch;

// Re-export main entry point
pub use dispatch::handle_request;
