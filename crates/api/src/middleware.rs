/// Bearer-token verification and role checks
pub mod auth;
/// Error envelope and status code mapping
pub mod error_handling;
