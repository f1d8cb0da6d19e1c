//! Application state definitions

use super::forms::LeadField;
use super::ProgressAnimation;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Hero, benefits, FAQ and call to action
    #[default]
    Landing,
    /// Multi-step lead form (including its success screen)
    Form,
    /// Privacy policy
    Privacy,
    /// Terms of use
    Terms,
}

/// Which input is focused on the contact step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactFocus {
    #[default]
    Name,
    Phone,
}

impl ContactFocus {
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Name => Self::Phone,
            Self::Phone => Self::Name,
        };
    }

    pub fn field(&self) -> LeadField {
        match self {
            Self::Name => LeadField::Name,
            Self::Phone => LeadField::Phone,
        }
    }
}

/// Main application state (view-level; the form session lives in the
/// controller owned by `App`)
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    /// Scroll offset of the landing view
    pub landing_scroll: u16,
    /// Scroll offset of the legal views
    pub legal_scroll: u16,
    /// Highlighted bucket on the age step
    pub age_cursor: usize,
    pub contact_focus: ContactFocus,
    /// Progress bar animation
    pub progress: ProgressAnimation,
    /// One-line status shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Reset the per-form view state for a new session
    pub fn reset_form_view(&mut self) {
        self.age_cursor = 0;
        self.contact_focus = ContactFocus::default();
        self.progress.snap(0.0);
    }

    pub fn scroll_down(&mut self) {
        match self.current_view {
            View::Landing => self.landing_scroll = self.landing_scroll.saturating_add(1),
            View::Privacy | View::Terms => {
                self.legal_scroll = self.legal_scroll.saturating_add(1);
            }
            View::Form => {}
        }
    }

    pub fn scroll_up(&mut self) {
        match self.current_view {
            View::Landing => self.landing_scroll = self.landing_scroll.saturating_sub(1),
            View::Privacy | View::Terms => {
                self.legal_scroll = self.legal_scroll.saturating_sub(1);
            }
            View::Form => {}
        }
    }
}
