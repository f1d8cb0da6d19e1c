//! Application state and core logic

use crate::config::FunnelConfig;
use crate::lead::{
    track_if_present, ConversionTracker, HttpLeadClient, LeadSubmitter, PixelTracker,
    SubmitError, TrackingEvent,
};
use crate::state::{
    AppState, FormController, FormOptions, FormStage, LeadField, RetreatOutcome, View,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Outcome of a background submission
type SubmissionResult = Result<(), SubmitError>;

/// Main application struct
pub struct App {
    /// View-level state
    pub state: AppState,
    /// The lead form session
    pub form: FormController,
    /// Lead capture endpoint
    submitter: Arc<dyn LeadSubmitter>,
    /// Conversion collector, if configured
    tracker: Option<Arc<dyn ConversionTracker>>,
    results_tx: mpsc::UnboundedSender<SubmissionResult>,
    results_rx: mpsc::UnboundedReceiver<SubmissionResult>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &FunnelConfig) -> Result<Self> {
        let client = HttpLeadClient::new(config.endpoint_url_or_default(), config.request_timeout())?;
        tracing::info!(endpoint = client.endpoint(), "Lead endpoint configured");

        let tracker: Option<Arc<dyn ConversionTracker>> = match config.pixel_id.as_deref() {
            Some(pixel_id) => PixelTracker::new(pixel_id, config.pixel_endpoint_or_default())
                .map(|t| Arc::new(t) as Arc<dyn ConversionTracker>),
            None => None,
        };
        if tracker.is_none() {
            tracing::info!("Conversion tracking disabled");
        }

        Ok(Self::with_collaborators(
            config.form_options(),
            Arc::new(client),
            tracker,
        ))
    }

    /// Create an App with explicit collaborators
    pub fn with_collaborators(
        options: FormOptions,
        submitter: Arc<dyn LeadSubmitter>,
        tracker: Option<Arc<dyn ConversionTracker>>,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            form: FormController::new(options),
            submitter,
            tracker,
            results_tx,
            results_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn tracker(&self) -> Option<&dyn ConversionTracker> {
        self.tracker.as_deref()
    }

    /// Show the landing view at launch; counts as a page load
    pub fn start(&mut self) {
        self.show_landing();
        track_if_present(self.tracker(), TrackingEvent::PageView);
    }

    /// Show the landing view
    fn show_landing(&mut self) {
        self.state.current_view = View::Landing;
        self.state.landing_scroll = 0;
    }

    /// Enter the form with a fresh session
    pub fn open_form(&mut self) {
        self.form.reset();
        self.state.reset_form_view();
        self.state.current_view = View::Form;
        tracing::info!(session = %self.form.session_id(), "Form opened");
    }

    /// Legal documents are separate pages; each visit counts as a page load
    fn show_legal(&mut self, view: View) {
        self.state.legal_scroll = 0;
        self.state.current_view = view;
        track_if_present(self.tracker(), TrackingEvent::PageView);
    }

    /// Periodic update: due auto-advances, finished submissions and the
    /// progress animation
    pub fn tick(&mut self, now: Instant) {
        let stage_before = self.form.stage();
        self.form.tick(now);
        self.poll_submission();
        if self.form.stage() != stage_before {
            self.on_stage_changed();
        }
        self.state
            .progress
            .set_target(self.form.progress_percentage(), now);
    }

    /// Apply a finished submission, if any. Returns true if one was applied.
    pub fn poll_submission(&mut self) -> bool {
        match self.results_rx.try_recv() {
            Ok(result) => {
                self.apply_submission_result(result);
                true
            }
            Err(_) => false,
        }
    }

    fn apply_submission_result(&mut self, result: SubmissionResult) {
        if self.form.complete_submit(result) {
            track_if_present(self.tracker(), TrackingEvent::Lead);
            self.state.status_message = Some("Solicitud enviada".to_string());
        }
    }

    /// Start submitting the lead in the background.
    /// Returns false if no request was started.
    pub fn request_submit(&mut self) -> bool {
        let Some(lead) = self.form.begin_submit(Utc::now()) else {
            return false;
        };

        let submitter = Arc::clone(&self.submitter);
        let tx = self.results_tx.clone();
        tokio::spawn(async move {
            let result = submitter.submit_lead(&lead).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(result);
        });
        true
    }

    /// Sync view state that depends on the current stage
    fn on_stage_changed(&mut self) {
        if self.form.stage() == FormStage::AgeRange {
            let ranges = self.form.options().age_ranges;
            self.state.age_cursor = ranges.position(&self.form.draft().age_range).unwrap_or(0);
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.state.status_message = None;

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key),
            View::Form => self.handle_form_key(key),
            View::Privacy | View::Terms => self.handle_legal_key(key),
        }

        Ok(())
    }

    /// Handle keys in Landing view
    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('c') => self.open_form(),
            KeyCode::Char('p') => self.show_legal(View::Privacy),
            KeyCode::Char('t') => self.show_legal(View::Terms),
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Handle keys in the legal views
    fn handle_legal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.state.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.state.scroll_up(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => self.show_landing(),
            _ => {}
        }
    }

    /// Handle keys in Form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        // The request in flight owns the form until it resolves
        if self.form.is_submitting() {
            return;
        }

        let now = Instant::now();
        let stage_before = self.form.stage();

        if key.code == KeyCode::Esc {
            self.retreat();
        } else {
            match stage_before {
                FormStage::Location => self.handle_location_key(key, now),
                FormStage::AgeRange => self.handle_age_range_key(key, now),
                FormStage::Contact => self.handle_contact_key(key, now),
                FormStage::Success => {
                    if key.code == KeyCode::Enter {
                        self.show_landing();
                    }
                }
            }
        }

        if self.state.current_view == View::Form {
            if self.form.stage() != stage_before {
                self.on_stage_changed();
            }
            self.state
                .progress
                .set_target(self.form.progress_percentage(), now);
        }
    }

    fn retreat(&mut self) {
        if self.form.retreat() == RetreatOutcome::ExitForm {
            self.show_landing();
        }
    }

    fn handle_location_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Enter => {
                self.form.advance();
            }
            KeyCode::Char(c) => self.input_char(LeadField::ZipCode, c, now),
            KeyCode::Backspace => self.input_backspace(LeadField::ZipCode, now),
            _ => {}
        }
    }

    fn handle_age_range_key(&mut self, key: KeyEvent, now: Instant) {
        let buckets = self.form.options().age_ranges.buckets();
        if buckets.is_empty() {
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.age_cursor = if self.state.age_cursor == 0 {
                    buckets.len() - 1
                } else {
                    self.state.age_cursor - 1
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.age_cursor = (self.state.age_cursor + 1) % buckets.len();
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.select_age_bucket(self.state.age_cursor, now),
            KeyCode::Char(c) => {
                if let Some(index) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                    if index < buckets.len() {
                        self.state.age_cursor = index;
                        self.select_age_bucket(index, now);
                    }
                }
            }
            _ => {}
        }
    }

    fn select_age_bucket(&mut self, index: usize, now: Instant) {
        let Some(bucket) = self.form.options().age_ranges.buckets().get(index) else {
            return;
        };
        self.form.update_field(LeadField::AgeRange, bucket.value, now);
        if !self.form.options().auto_advance_age {
            self.form.advance();
        }
    }

    fn handle_contact_key(&mut self, key: KeyEvent, now: Instant) {
        let field = self.state.contact_focus.field();
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.contact_focus.toggle();
            }
            KeyCode::Enter => {
                self.request_submit();
            }
            KeyCode::Char(c) => self.input_char(field, c, now),
            KeyCode::Backspace => self.input_backspace(field, now),
            _ => {}
        }
    }

    fn input_char(&mut self, field: LeadField, c: char, now: Instant) {
        let raw = field.with_char(self.form.draft().field(field), c);
        self.form.update_field(field, &raw, now);
    }

    fn input_backspace(&mut self, field: LeadField, now: Instant) {
        let raw = field.without_last(self.form.draft().field(field));
        self.form.update_field(field, &raw, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::MockLeadSubmitter;
    use crate::state::{ContactFocus, SUBMIT_ERROR_MESSAGE};
    use crossterm::event::KeyModifiers;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingTracker {
        events: Mutex<Vec<TrackingEvent>>,
    }

    impl ConversionTracker for RecordingTracker {
        fn track(&self, event: TrackingEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app_with(submitter: MockLeadSubmitter) -> App {
        App::with_collaborators(FormOptions::default(), Arc::new(submitter), None)
    }

    /// Drive the form to the contact step with a valid draft
    fn fill_to_contact(app: &mut App) {
        app.open_form();
        type_str(app, "90210");
        app.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.form.stage(), FormStage::AgeRange);
        app.handle_key(key(KeyCode::Char('3'))).unwrap();
        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.form.stage(), FormStage::Contact);
        type_str(app, "Jose Perez");
        app.handle_key(key(KeyCode::Tab)).unwrap();
        type_str(app, "5551234567");
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_should_quit_initially_false() {
            let app = app_with(MockLeadSubmitter::new());
            assert!(!app.should_quit());
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_quit_from_landing() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.handle_key(key(KeyCode::Char('q'))).unwrap();
            assert!(app.should_quit());
        }

        #[test]
        fn test_enter_opens_form() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.form.stage(), FormStage::Location);
        }

        #[test]
        fn test_legal_views_and_back() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.handle_key(key(KeyCode::Char('p'))).unwrap();
            assert_eq!(app.state.current_view, View::Privacy);
            app.handle_key(key(KeyCode::Down)).unwrap();
            assert_eq!(app.state.legal_scroll, 1);
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);

            app.handle_key(key(KeyCode::Char('t'))).unwrap();
            assert_eq!(app.state.current_view, View::Terms);
            assert_eq!(app.state.legal_scroll, 0);
        }

        #[test]
        fn test_esc_on_first_step_returns_to_landing() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_reopening_form_resets_draft() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "331");
            app.handle_key(key(KeyCode::Esc)).unwrap();
            app.open_form();
            assert_eq!(app.form.draft().zip_code, "");
        }

        fn tracked_app() -> (App, Arc<RecordingTracker>) {
            let tracker = Arc::new(RecordingTracker::default());
            let app = App::with_collaborators(
                FormOptions::default(),
                Arc::new(MockLeadSubmitter::new()),
                Some(tracker.clone() as Arc<dyn ConversionTracker>),
            );
            (app, tracker)
        }

        #[test]
        fn test_page_view_once_at_start() {
            let (mut app, tracker) = tracked_app();
            app.start();
            app.open_form();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);

            assert_eq!(*tracker.events.lock().unwrap(), vec![TrackingEvent::PageView]);
        }

        #[test]
        fn test_page_view_for_each_legal_page() {
            let (mut app, tracker) = tracked_app();
            app.handle_key(key(KeyCode::Char('p'))).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            app.handle_key(key(KeyCode::Char('t'))).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();

            assert_eq!(
                *tracker.events.lock().unwrap(),
                vec![TrackingEvent::PageView, TrackingEvent::PageView]
            );
        }

        #[test]
        fn test_esc_on_later_step_goes_back_and_keeps_values() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "33101");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.state.current_view, View::Form);
            assert_eq!(app.form.stage(), FormStage::Location);
            assert_eq!(app.form.draft().zip_code, "33101");
        }
    }

    mod form_input {
        use super::*;

        #[test]
        fn test_zip_typing_filters_letters() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "3a3101x9");
            assert_eq!(app.form.draft().zip_code, "33101");
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.form.draft().zip_code, "3310");
        }

        #[test]
        fn test_invalid_zip_shows_error() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "331");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.form.stage(), FormStage::Location);
            assert!(app.form.error_message().is_some());
        }

        #[test]
        fn test_age_cursor_wraps() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "33101");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Up)).unwrap();
            assert_eq!(app.state.age_cursor, 4);
            app.handle_key(key(KeyCode::Down)).unwrap();
            assert_eq!(app.state.age_cursor, 0);
        }

        #[test]
        fn test_age_selection_waits_for_delay() {
            let mut app = app_with(MockLeadSubmitter::new());
            app.open_form();
            type_str(&mut app, "33101");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Enter)).unwrap();

            assert_eq!(app.form.draft().age_range, "35-40");
            assert_eq!(app.form.stage(), FormStage::AgeRange);
            app.tick(Instant::now() + Duration::from_secs(1));
            assert_eq!(app.form.stage(), FormStage::Contact);
        }

        #[test]
        fn test_age_selection_without_auto_advance_moves_immediately() {
            let options = FormOptions {
                auto_advance_age: false,
                ..FormOptions::default()
            };
            let mut app =
                App::with_collaborators(options, Arc::new(MockLeadSubmitter::new()), None);
            app.open_form();
            type_str(&mut app, "33101");
            app.handle_key(key(KeyCode::Enter)).unwrap();
            app.handle_key(key(KeyCode::Char('2'))).unwrap();
            assert_eq!(app.form.draft().age_range, "41-45");
            assert_eq!(app.form.stage(), FormStage::Contact);
        }

        #[test]
        fn test_returning_to_age_step_restores_cursor() {
            let mut app = app_with(MockLeadSubmitter::new());
            fill_to_contact(&mut app);
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert_eq!(app.form.stage(), FormStage::AgeRange);
            assert_eq!(app.state.age_cursor, 2);
        }

        #[test]
        fn test_contact_fields_and_phone_mask() {
            let mut app = app_with(MockLeadSubmitter::new());
            fill_to_contact(&mut app);
            assert_eq!(app.form.draft().name, "Jose Perez");
            assert_eq!(app.form.draft().phone, "(555) 123-4567");
            assert_eq!(app.state.contact_focus, ContactFocus::Phone);

            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(app.form.draft().phone, "(555) 123-456");
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_double_submit_sends_one_request() {
            let mut submitter = MockLeadSubmitter::new();
            submitter
                .expect_submit_lead()
                .withf(|lead| lead.phone == "5551234567" && lead.zip_code == "90210")
                .times(1)
                .returning(|_| Ok(()));

            let mut app = app_with(submitter);
            fill_to_contact(&mut app);

            assert!(app.request_submit());
            assert!(!app.request_submit());
            // Enter while in flight is swallowed as well
            app.handle_key(key(KeyCode::Enter)).unwrap();

            let result = app.results_rx.recv().await.unwrap();
            app.apply_submission_result(result);

            assert!(app.form.is_submitted());
            assert!(!app.form.is_submitting());
            assert_eq!(app.form.stage(), FormStage::Success);
            assert_eq!(app.form.error_message(), None);
        }

        #[tokio::test]
        async fn test_failed_submit_shows_generic_error() {
            let mut submitter = MockLeadSubmitter::new();
            submitter.expect_submit_lead().times(1).returning(|_| {
                Err(SubmitError::Status(reqwest::StatusCode::BAD_REQUEST))
            });

            let mut app = app_with(submitter);
            fill_to_contact(&mut app);
            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert!(app.form.is_submitting());

            let result = app.results_rx.recv().await.unwrap();
            app.apply_submission_result(result);

            assert!(!app.form.is_submitted());
            assert_eq!(app.form.error_message(), Some(SUBMIT_ERROR_MESSAGE));
            assert_eq!(app.form.stage(), FormStage::Contact);
        }

        #[tokio::test]
        async fn test_lead_event_tracked_after_success() {
            let mut submitter = MockLeadSubmitter::new();
            submitter.expect_submit_lead().returning(|_| Ok(()));
            let tracker = Arc::new(RecordingTracker::default());

            let mut app = App::with_collaborators(
                FormOptions::default(),
                Arc::new(submitter),
                Some(tracker.clone() as Arc<dyn ConversionTracker>),
            );
            app.start();
            fill_to_contact(&mut app);
            assert!(app.request_submit());

            let result = app.results_rx.recv().await.unwrap();
            app.apply_submission_result(result);

            assert_eq!(
                *tracker.events.lock().unwrap(),
                vec![TrackingEvent::PageView, TrackingEvent::Lead]
            );
            assert_eq!(app.state.status_message.as_deref(), Some("Solicitud enviada"));
        }

        #[tokio::test]
        async fn test_no_lead_event_after_failure() {
            let mut submitter = MockLeadSubmitter::new();
            submitter
                .expect_submit_lead()
                .returning(|_| Err(SubmitError::Status(reqwest::StatusCode::BAD_GATEWAY)));
            let tracker = Arc::new(RecordingTracker::default());

            let mut app = App::with_collaborators(
                FormOptions::default(),
                Arc::new(submitter),
                Some(tracker.clone() as Arc<dyn ConversionTracker>),
            );
            fill_to_contact(&mut app);
            app.request_submit();
            let result = app.results_rx.recv().await.unwrap();
            app.apply_submission_result(result);

            assert!(tracker.events.lock().unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_success_enter_returns_to_landing() {
            let mut submitter = MockLeadSubmitter::new();
            submitter.expect_submit_lead().returning(|_| Ok(()));
            let mut app = app_with(submitter);
            fill_to_contact(&mut app);
            app.request_submit();
            let result = app.results_rx.recv().await.unwrap();
            app.apply_submission_result(result);

            app.handle_key(key(KeyCode::Enter)).unwrap();
            assert_eq!(app.state.current_view, View::Landing);
        }

        #[test]
        fn test_invalid_contact_does_not_submit() {
            let mut submitter = MockLeadSubmitter::new();
            submitter.expect_submit_lead().never();
            let mut app = app_with(submitter);
            app.open_form();
            assert!(!app.request_submit());
            assert!(!app.poll_submission());
        }
    }
}
