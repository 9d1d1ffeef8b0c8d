//! Upstream orders API client
//!
//! Issues the single GET request a run needs and parses the JSON envelope.
//! There is deliberately no retry here: the orchestrator owns the bounded
//! retry policy, this client fails fast and loud.

mod api;

pub use api::{ApiClient, RawEnvelope};
