/// Mapping of domain errors to HTTP responses
pub mod error_handling;
/// Per-IP throttling of the public slot endpoint
pub mod rate_limit;
