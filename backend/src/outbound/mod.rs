//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local user storage behind a lock
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
