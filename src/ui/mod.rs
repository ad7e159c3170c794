pub mod header;
pub mod layout;
pub mod starfield;
pub mod theme;

use crate::app::App;
use ratatui::Frame;

/// Master render function: draws the star field, then the overlay.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    // Layer 0: starfield background
    starfield::draw_starfield(f, area, &app.raster, app.config.pixel_scale());

    // Layer 1: header and footer
    if app.show_overlay {
        layout::draw_overlay(f, area, app);
    }
}
