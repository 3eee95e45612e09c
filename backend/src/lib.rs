//! In-memory user registry served over HTTP.
//!
//! Layout follows a ports-and-adapters split:
//! - [`domain`]: user records, validation, and the store service.
//! - [`inbound::http`]: Actix handlers rendering the JSON envelope.
//! - [`outbound::memory`]: the process-local repository.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
