//! Multi-step lead form controller
//!
//! Owns the step position, the draft, validation and the submission
//! lifecycle. Rendering and key handling live in the app/ui layers; this
//! module only exposes plain transitions so any front end can drive it.

use super::age_range::AgeRangeSet;
use super::field::{digits_only, LeadField, PHONE_DIGITS, ZIP_LENGTH};
use crate::lead::{
    track_if_present, ConversionTracker, LeadSubmission, LeadSubmitter, SubmitError,
    TrackingEvent,
};
use crate::state::ScheduledAdvance;
use crate::zip_lookup::state_abbreviation_for_zip;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Message shown when the endpoint rejects or cannot be reached
pub const SUBMIT_ERROR_MESSAGE: &str = "Hubo un error. Por favor intenta de nuevo.";

/// Minimum trimmed length of the visitor's name
const MIN_NAME_LENGTH: usize = 2;

/// Position in the form sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStage {
    #[default]
    Location,
    AgeRange,
    Contact,
    Success,
}

impl FormStage {
    /// The three input steps, in order
    pub const STEPS: [FormStage; 3] = [Self::Location, Self::AgeRange, Self::Contact];

    /// 0-based position in the sequence
    pub fn index(&self) -> usize {
        match self {
            Self::Location => 0,
            Self::AgeRange => 1,
            Self::Contact => 2,
            Self::Success => 3,
        }
    }

    /// Next input step reachable through `advance`.
    ///
    /// `Contact` has none: `Success` is only reached by submitting.
    pub fn next_step(&self) -> Option<Self> {
        match self {
            Self::Location => Some(Self::AgeRange),
            Self::AgeRange => Some(Self::Contact),
            Self::Contact | Self::Success => None,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::AgeRange => Some(Self::Location),
            Self::Contact => Some(Self::AgeRange),
            Self::Location | Self::Success => None,
        }
    }

    /// Short step name for the step indicator
    pub fn name(&self) -> &'static str {
        match self {
            Self::Location => "Ubicación",
            Self::AgeRange => "Edad",
            Self::Contact => "Contacto",
            Self::Success => "Listo",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Location => "¿En qué área vives?",
            Self::AgeRange => "¿Cuál es tu rango de edad?",
            Self::Contact => "¡Casi listo!",
            Self::Success => "¡Gracias!",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Location => "Esto nos ayuda a conectarte con un especialista en tu zona.",
            Self::AgeRange => "Para personalizar tu análisis financiero.",
            Self::Contact => "¿A dónde enviamos tu análisis gratuito?",
            Self::Success => "Un especialista bilingüe se comunicará contigo pronto.",
        }
    }
}

/// Per-field validation failure; `Display` is the visitor-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor ingresa un código postal válido de 5 dígitos")]
    InvalidZip,

    #[error("Por favor selecciona tu rango de edad")]
    MissingAgeRange,

    #[error("Por favor ingresa tu nombre")]
    InvalidName,

    #[error("Por favor ingresa un número de teléfono válido de 10 dígitos")]
    InvalidPhone,
}

/// Mutable form values for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    /// Digits only, at most five
    pub zip_code: String,
    /// Bucket value, stored verbatim
    pub age_range: String,
    pub name: String,
    /// Masked `(XXX) XXX-XXXX`
    pub phone: String,
}

impl LeadDraft {
    pub fn phone_digits(&self) -> String {
        digits_only(&self.phone)
    }

    /// First word of the name, for the success greeting
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    /// Check the fields belonging to `stage`, reporting the first failure
    pub fn check(&self, stage: FormStage) -> Result<(), ValidationError> {
        match stage {
            FormStage::Location => {
                let valid = self.zip_code.len() == ZIP_LENGTH
                    && self.zip_code.bytes().all(|b| b.is_ascii_digit());
                if !valid {
                    return Err(ValidationError::InvalidZip);
                }
            }
            FormStage::AgeRange => {
                if self.age_range.is_empty() {
                    return Err(ValidationError::MissingAgeRange);
                }
            }
            FormStage::Contact => {
                if self.name.trim().chars().count() < MIN_NAME_LENGTH {
                    return Err(ValidationError::InvalidName);
                }
                if self.phone_digits().len() != PHONE_DIGITS {
                    return Err(ValidationError::InvalidPhone);
                }
            }
            FormStage::Success => {}
        }
        Ok(())
    }

    fn field_mut(&mut self, field: LeadField) -> &mut String {
        match field {
            LeadField::ZipCode => &mut self.zip_code,
            LeadField::AgeRange => &mut self.age_range,
            LeadField::Name => &mut self.name,
            LeadField::Phone => &mut self.phone,
        }
    }

    pub fn field(&self, field: LeadField) -> &str {
        match field {
            LeadField::ZipCode => &self.zip_code,
            LeadField::AgeRange => &self.age_range,
            LeadField::Name => &self.name,
            LeadField::Phone => &self.phone,
        }
    }
}

/// What `retreat` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetreatOutcome {
    /// Moved back to the given stage
    Moved(FormStage),
    /// No earlier stage: the host should leave the form
    ExitForm,
}

/// Variant-specific behaviour of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOptions {
    pub age_ranges: AgeRangeSet,
    /// Advance from the ZIP step once five digits are entered
    pub auto_advance_zip: bool,
    /// Advance from the age step once a bucket is picked
    pub auto_advance_age: bool,
    pub auto_advance_delay: Duration,
    /// Sent as `userAgent`
    pub user_agent: String,
    /// Sent as `pageUrl`
    pub page_url: String,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            age_ranges: AgeRangeSet::default(),
            auto_advance_zip: false,
            auto_advance_age: true,
            auto_advance_delay: ScheduledAdvance::DEFAULT_DELAY,
            user_agent: concat!("lead-funnel-tui/", env!("CARGO_PKG_VERSION")).to_string(),
            page_url: String::new(),
        }
    }
}

/// Controller for one form session
#[derive(Debug, Clone)]
pub struct FormController {
    stage: FormStage,
    draft: LeadDraft,
    submitting: bool,
    submitted: bool,
    error_message: Option<String>,
    pending_advance: Option<ScheduledAdvance>,
    session_id: Uuid,
    options: FormOptions,
}

impl FormController {
    pub fn new(options: FormOptions) -> Self {
        Self {
            stage: FormStage::default(),
            draft: LeadDraft::default(),
            submitting: false,
            submitted: false,
            error_message: None,
            pending_advance: None,
            session_id: Uuid::new_v4(),
            options,
        }
    }

    /// Start a fresh session: empty draft, first step, new session id
    pub fn reset(&mut self) {
        self.stage = FormStage::default();
        self.draft = LeadDraft::default();
        self.submitting = false;
        self.submitted = false;
        self.error_message = None;
        self.pending_advance = None;
        self.session_id = Uuid::new_v4();
        tracing::debug!(session = %self.session_id, "Form session started");
    }

    pub fn stage(&self) -> FormStage {
        self.stage
    }

    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn pending_advance(&self) -> Option<&ScheduledAdvance> {
        self.pending_advance.as_ref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Store a raw input value for `field`, normalized the way the draft
    /// keeps it. May schedule an auto-advance.
    pub fn update_field(&mut self, field: LeadField, raw: &str, now: Instant) {
        let value = field.sanitize(raw);
        *self.draft.field_mut(field) = value;

        match field {
            LeadField::ZipCode if self.options.auto_advance_zip => {
                if self.draft.zip_code.len() == ZIP_LENGTH {
                    self.schedule_advance(FormStage::Location, now);
                } else if self
                    .pending_advance
                    .is_some_and(|p| p.applies_to(FormStage::Location))
                {
                    self.pending_advance = None;
                }
            }
            LeadField::AgeRange if self.options.auto_advance_age => {
                if !self.draft.age_range.is_empty() {
                    self.schedule_advance(FormStage::AgeRange, now);
                }
            }
            _ => {}
        }
    }

    fn schedule_advance(&mut self, from: FormStage, now: Instant) {
        if self.stage != from {
            return;
        }
        self.pending_advance = Some(ScheduledAdvance::new(
            from,
            now,
            self.options.auto_advance_delay,
        ));
    }

    /// Fire a due auto-advance. Returns true if the stage changed.
    ///
    /// A schedule whose stage has since been left, or whose stage no longer
    /// validates, is dropped without touching the error message.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_advance else {
            return false;
        };
        if !pending.is_due(now) {
            return false;
        }
        self.pending_advance = None;

        if !pending.applies_to(self.stage) || self.draft.check(self.stage).is_err() {
            return false;
        }
        self.advance()
    }

    /// Validate `stage`, setting or clearing the error message
    pub fn validate_stage(&mut self, stage: FormStage) -> bool {
        match self.draft.check(stage) {
            Ok(()) => {
                self.error_message = None;
                true
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                false
            }
        }
    }

    /// Move to the next step if the current one validates
    pub fn advance(&mut self) -> bool {
        self.pending_advance = None;

        if !self.validate_stage(self.stage) {
            tracing::debug!(session = %self.session_id, stage = ?self.stage, "Stage rejected");
            return false;
        }
        // Contact only moves on through a submission
        let Some(next) = self.stage.next_step() else {
            return false;
        };

        tracing::debug!(session = %self.session_id, from = ?self.stage, to = ?next, "Advanced");
        self.stage = next;
        true
    }

    /// Step back without validation
    pub fn retreat(&mut self) -> RetreatOutcome {
        self.pending_advance = None;

        match self.stage.previous() {
            Some(previous) => {
                self.error_message = None;
                self.stage = previous;
                RetreatOutcome::Moved(previous)
            }
            None => RetreatOutcome::ExitForm,
        }
    }

    /// Start a submission. Returns the payload to send, or `None` when a
    /// request is already in flight, the lead was already accepted, or the
    /// contact step does not validate.
    pub fn begin_submit(&mut self, submitted_at: DateTime<Utc>) -> Option<LeadSubmission> {
        if self.submitting || self.submitted {
            return None;
        }
        if !self.validate_stage(FormStage::Contact) {
            return None;
        }

        self.submitting = true;
        self.error_message = None;
        self.pending_advance = None;

        let lead = LeadSubmission::from_draft(
            &self.draft,
            submitted_at,
            &self.options.user_agent,
            &self.options.page_url,
        );
        tracing::info!(session = %self.session_id, zip3 = lead.zip3(), "Submitting lead");
        Some(lead)
    }

    /// Apply the outcome of the request started by `begin_submit`.
    /// Returns true if the lead was accepted.
    pub fn complete_submit(&mut self, result: Result<(), SubmitError>) -> bool {
        if !self.submitting {
            tracing::warn!(session = %self.session_id, "Submission result without request in flight");
            return false;
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                tracing::info!(session = %self.session_id, "Lead accepted");
                self.submitted = true;
                self.stage = FormStage::Success;
                self.error_message = None;
                true
            }
            Err(e) => {
                tracing::warn!(
                    session = %self.session_id,
                    rejected = e.is_status(),
                    error = %e,
                    "Lead submission failed"
                );
                self.error_message = Some(SUBMIT_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    /// Submit and await the endpoint in one call
    pub async fn submit(
        &mut self,
        submitter: &dyn LeadSubmitter,
        tracker: Option<&dyn ConversionTracker>,
    ) -> bool {
        let Some(lead) = self.begin_submit(Utc::now()) else {
            return false;
        };
        let result = submitter.submit_lead(&lead).await;
        let accepted = self.complete_submit(result);
        if accepted {
            track_if_present(tracker, TrackingEvent::Lead);
        }
        accepted
    }

    /// Progress bar fill, 0-100
    pub fn progress_percentage(&self) -> f64 {
        if self.submitted {
            return 100.0;
        }
        let index = self.stage.index().min(FormStage::STEPS.len());
        index as f64 / FormStage::STEPS.len() as f64 * 100.0
    }

    /// State code for the entered ZIP (cosmetic only)
    pub fn state_abbreviation(&self) -> &'static str {
        state_abbreviation_for_zip(&self.draft.zip_code)
    }

    /// Attribution line for the testimonial on the contact step
    pub fn testimonial_attribution(&self) -> String {
        format!("— Carmen R., {}", self.state_abbreviation())
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(FormOptions::default())
    }
}
