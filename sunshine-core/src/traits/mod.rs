//! Capability traits
//!
//! These traits define the interface between the face engine and the
//! platform it runs on.

pub mod entropy;
pub mod link;
pub mod metrics;
pub mod scheduler;

pub use entropy::EntropySource;
pub use link::{CompanionLink, LinkError};
pub use metrics::TextMetrics;
pub use scheduler::TickScheduler;
