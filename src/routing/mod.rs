//! Routing module
//!
//! Owns the route table: an exact-match mapping from URL paths to
//! template identifiers, built once at startup.

mod router;

pub use router::{RouteError, TemplateRouter};
