//! Shared helpers for provider implementations

mod http_response;
mod vector_literal;

pub use http_response::{HttpResponseUtils, transport_error};
pub use vector_literal::{from_vector_literal, to_vector_literal};
