//! Service layer for business logic and orchestration.
//!
//! This module contains the downtime-transition analysis pipeline. The
//! stages are plain functions over in-memory data so each can be tested
//! without a repository: the filter resolver normalizes raw query input,
//! the sequence builder reconstructs per-line stoppage sequences, the
//! aggregator pools consecutive-pair counts, and the ranker/assembler
//! produce the final dataset.

pub mod error;

pub mod filters;

pub mod transitions;

pub use error::{ServiceError, ServiceResult};
pub use filters::{
    resolve_event_filters, resolve_transitions_filters, RawEventsQuery, RawTransitionsQuery,
};
pub use transitions::get_transitions_data;

#[cfg(test)]
#[path = "filters_tests.rs"]
mod filters_tests;

#[cfg(test)]
#[path = "transitions_tests.rs"]
mod transitions_tests;
