//! Lead delivery: capture endpoint client and conversion tracking

mod client;
mod error;
mod payload;
mod tracking;
mod traits;

pub use client::{HttpLeadClient, DEFAULT_TIMEOUT};
pub use error::SubmitError;
pub use payload::LeadSubmission;
pub use tracking::{
    track_if_present, ConversionTracker, PixelTracker, TrackingEvent, DEFAULT_PIXEL_ENDPOINT,
};
pub use traits::LeadSubmitter;

#[cfg(test)]
pub use traits::MockLeadSubmitter;
