use serde::{Deserialize, Serialize};

use crate::value_objects::SourceTag;

/// Candidate ingestion events that trigger a vector refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CandidateEvent {
    /// A new candidate record was ingested
    Created {
        /// Entity identifier
        entity_id: String,
        /// Summary text
        profile_text: String,
        /// Long-form text
        body_text: String,
    },
    /// Candidate fields were edited
    Updated {
        /// Entity identifier
        entity_id: String,
        /// Summary text
        profile_text: String,
        /// Long-form text
        body_text: String,
    },
    /// A resume or other document was attached
    DocumentAttached {
        /// Entity identifier
        entity_id: String,
        /// Summary text
        profile_text: String,
        /// Extracted document text
        body_text: String,
    },
}

impl CandidateEvent {
    /// Entity the event refers to
    pub fn entity_id(&self) -> &str {
        match self {
            Self::Created { entity_id, .. }
            | Self::Updated { entity_id, .. }
            | Self::DocumentAttached { entity_id, .. } => entity_id,
        }
    }

    /// Summary and body text carried by the event
    pub fn texts(&self) -> (&str, &str) {
        match self {
            Self::Created {
                profile_text,
                body_text,
                ..
            }
            | Self::Updated {
                profile_text,
                body_text,
                ..
            }
            | Self::DocumentAttached {
                profile_text,
                body_text,
                ..
            } => (profile_text, body_text),
        }
    }

    /// Job source tag for this event
    pub fn source_tag(&self) -> SourceTag {
        match self {
            Self::Created { .. } => SourceTag::Created,
            Self::Updated { .. } => SourceTag::Updated,
            Self::DocumentAttached { .. } => SourceTag::DocumentAttached,
        }
    }
}
