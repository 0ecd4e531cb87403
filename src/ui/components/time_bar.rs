use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Remaining time drawn as a draining bar with the whole seconds centered.
pub struct TimeBar<'a> {
    pub seconds_remaining: u64,
    pub ratio: f64,
    pub theme: &'a Theme,
}

impl<'a> TimeBar<'a> {
    pub fn new(time_left_ms: u64, time_limit_ms: u64, theme: &'a Theme) -> Self {
        let ratio = if time_limit_ms == 0 {
            0.0
        } else {
            time_left_ms as f64 / time_limit_ms as f64
        };
        Self {
            seconds_remaining: time_left_ms / 1000,
            // Bonus time can push the clock past the level's limit.
            ratio: ratio.clamp(0.0, 1.0),
            theme,
        }
    }
}

impl Widget for TimeBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Time ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled = if self.seconds_remaining <= 5 {
            colors.error()
        } else if self.ratio < 0.34 {
            colors.warning()
        } else {
            colors.bar_filled()
        };

        let filled_width = (self.ratio * inner.width as f64) as u16;
        let label = format!("{}s", self.seconds_remaining);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(filled)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
