use crate::raster::Raster;
use crate::types::Rgb;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use ratatui::Frame;

const HALF_BLOCK: char = '▀';

/// Virtual pixel size of a terminal area: each cell is `scale` pixels wide
/// and `2 * scale` tall, split into an upper and lower half.
pub fn viewport_pixels(area: Rect, scale: u16) -> (u32, u32) {
    let scale = scale.max(1) as u32;
    (
        area.width as u32 * scale,
        area.height as u32 * 2 * scale,
    )
}

pub fn draw_starfield(f: &mut Frame, area: Rect, raster: &Raster, scale: u16) {
    let widget = StarfieldWidget { raster, scale };
    f.render_widget(widget, area);
}

struct StarfieldWidget<'a> {
    raster: &'a Raster,
    scale: u16,
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let s = self.scale.max(1) as u32;
        for row in 0..area.height {
            for col in 0..area.width {
                let x0 = col as u32 * s;
                let top_y = row as u32 * 2 * s;
                let top = self.raster.max_in(x0, top_y, x0 + s, top_y + s);
                let bottom = self.raster.max_in(x0, top_y + s, x0 + s, top_y + 2 * s);

                let cell = &mut buf[(area.x + col, area.y + row)];
                cell.set_char(HALF_BLOCK);
                cell.set_style(Style::default().fg(to_color(top)).bg(to_color(bottom)));
            }
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb(r, g, b)
}
