use super::{header, theme};
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Draws the header and footer over the star field.
pub fn draw_overlay(f: &mut Frame, area: Rect, app: &App) {
    // Vertical: header | sky | footer
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // header
            Constraint::Min(0),    // open sky
            Constraint::Length(1), // footer
        ])
        .split(area);

    header::draw_header(f, vert[0], app);
    draw_footer(f, vert[2], app);
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    // Show flash message if active, otherwise normal footer
    if let Some(msg) = app.current_flash() {
        let footer = Line::from(vec![Span::styled(
            format!(" {} ", msg),
            theme::flash_style(),
        )]);
        f.render_widget(Paragraph::new(footer), area);
        return;
    }

    let state = app.animation.state();
    let streaks = app.animation.pool().map_or(0, |p| p.active_count());
    let footer = Line::from(vec![
        Span::styled(" [r]", theme::key_hint_style()),
        Span::styled(" Restart  ", theme::footer_style()),
        Span::styled("[h]", theme::key_hint_style()),
        Span::styled(" Hide overlay  ", theme::footer_style()),
        Span::styled("[q]", theme::key_hint_style()),
        Span::styled(" Quit  ", theme::footer_style()),
        Span::styled(format!("{}", state), theme::state_style(state)),
        Span::styled(
            format!("  frame {}  streaks {}", app.animation.frames(), streaks),
            theme::footer_style(),
        ),
    ]);

    f.render_widget(Paragraph::new(footer), area);
}
