//! Domain Events
//!
//! Ingestion events raised by the surrounding record-keeping system. Each one
//! may require the candidate's vector to be regenerated.

mod candidate_events;

pub use candidate_events::CandidateEvent;
