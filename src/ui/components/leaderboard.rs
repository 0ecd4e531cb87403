use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

pub const EMPTY_MESSAGE: &str = "No high scores yet!";

/// Ranked scores, optionally highlighting the row the last game landed on.
pub struct LeaderboardPanel<'a> {
    high_score: u32,
    entries: &'a [u32],
    highlight: Option<usize>,
    theme: &'a Theme,
}

impl<'a> LeaderboardPanel<'a> {
    pub fn new(high_score: u32, entries: &'a [u32], theme: &'a Theme) -> Self {
        Self {
            high_score,
            entries,
            highlight: None,
            theme,
        }
    }

    pub fn highlight(mut self, rank: Option<usize>) -> Self {
        self.highlight = rank;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(" High score: ", Style::default().fg(colors.fg())),
                Span::styled(
                    self.high_score.to_string(),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if self.entries.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(" {EMPTY_MESSAGE}"),
                Style::default().fg(colors.muted()),
            )));
            return lines;
        }

        for (i, score) in self.entries.iter().enumerate() {
            let style = if self.highlight == Some(i) {
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(
                format!(" {:>2}. {score:>6}", i + 1),
                style,
            )));
        }
        lines
    }
}

impl Widget for LeaderboardPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Leaderboard ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines()).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(panel: LeaderboardPanel<'_>, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_empty_leaderboard_message() {
        let theme = Theme::default();
        let text = rendered(LeaderboardPanel::new(0, &[], &theme), Rect::new(0, 0, 30, 8));
        assert!(text.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_entries_are_numbered() {
        let theme = Theme::default();
        let entries = [90, 40];
        let text = rendered(
            LeaderboardPanel::new(90, &entries, &theme).highlight(Some(0)),
            Rect::new(0, 0, 30, 8),
        );
        assert!(text.contains(" 1.     90"));
        assert!(text.contains(" 2.     40"));
        assert!(!text.contains(EMPTY_MESSAGE));
    }
}
