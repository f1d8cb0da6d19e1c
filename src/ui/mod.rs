//! UI module for rendering the TUI

mod components;
mod field_renderer;
mod form;
mod landing;
mod layout;
mod legal;

use crate::app::App;
use crate::state::View;
use ratatui::Frame;
use std::time::Instant;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    // Draw main content based on current view
    match app.state.current_view {
        View::Landing => landing::draw(frame, main_area, app),
        View::Form => form::draw(frame, main_area, app, now),
        View::Privacy | View::Terms => legal::draw(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, status_area, app);
}
