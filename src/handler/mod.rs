//! Request handler module
//!
//! Request routing dispatch and the query endpoints behind it.

mod endpoints;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
