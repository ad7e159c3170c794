use crate::types::LoopState;
use ratatui::style::{Color, Modifier, Style};

// ── Base palette ────────────────────────────────────────────────
pub const TEXT: Color = Color::Rgb(235, 235, 235);
pub const TEXT_DIM: Color = Color::Rgb(130, 130, 130);
pub const ACCENT: Color = Color::Rgb(235, 235, 235);
pub const ACCENT_WARM: Color = Color::Rgb(220, 220, 240);

pub const SUCCESS: Color = Color::Rgb(0, 255, 0);
pub const WARNING: Color = Color::Rgb(200, 200, 200);

// ── Composite styles ────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn eyebrow_style() -> Style {
    Style::default().fg(ACCENT_WARM)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn key_hint_style() -> Style {
    Style::default()
        .fg(ACCENT_WARM)
        .add_modifier(Modifier::BOLD)
}

pub fn state_style(state: LoopState) -> Style {
    match state {
        LoopState::Running => Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
        LoopState::Stopped => Style::default().fg(WARNING).add_modifier(Modifier::BOLD),
    }
}

pub fn flash_style() -> Style {
    Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
}

pub fn footer_style() -> Style {
    Style::default().fg(TEXT_DIM)
}
