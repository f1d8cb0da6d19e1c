//! Form domain layer
//!
//! Type-safe lead form handling: field masks, age buckets and the
//! multi-step controller that drives the funnel.

mod age_range;
mod field;
mod form_state;

pub use age_range::AgeRangeSet;
pub use field::LeadField;
pub use form_state::{FormController, FormOptions, FormStage, LeadDraft, RetreatOutcome};

#[cfg(test)]
pub use form_state::SUBMIT_ERROR_MESSAGE;
