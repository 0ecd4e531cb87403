use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use quickmath::session::GameSummary;

use crate::ui::components::leaderboard::LeaderboardPanel;
use crate::ui::theme::Theme;

/// Game-over screen: final score, accuracy and where the run placed.
pub struct Dashboard<'a> {
    pub summary: &'a GameSummary,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(summary: &'a GameSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let block = Block::bordered()
            .title(" Game Over ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut title_spans = vec![Span::styled(
            "Time's up!",
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )];
        if summary.new_high_score {
            title_spans.push(Span::styled(
                "  New High Score!",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Paragraph::new(Line::from(title_spans))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let score_line = Line::from(vec![
            Span::styled("  Score:    ", Style::default().fg(colors.fg())),
            Span::styled(
                summary.final_score.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  (best {})", summary.high_score),
                Style::default().fg(colors.muted()),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let accuracy = summary.accuracy();
        let acc_color = if accuracy >= 90.0 {
            colors.success()
        } else if accuracy >= 70.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let acc_line = Line::from(vec![
            Span::styled("  Accuracy: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{accuracy:.1}%"),
                Style::default().fg(acc_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  ({}/{} correct)",
                    summary.correct_answers,
                    summary.answered()
                ),
                Style::default().fg(colors.muted()),
            ),
        ]);
        Paragraph::new(acc_line).render(layout[2], buf);

        let level_line = Line::from(vec![
            Span::styled("  Level:    ", Style::default().fg(colors.fg())),
            Span::styled(
                summary.difficulty_level.to_string(),
                Style::default().fg(colors.fg()),
            ),
        ]);
        Paragraph::new(level_line).render(layout[3], buf);

        LeaderboardPanel::new(summary.high_score, &summary.leaderboard, self.theme)
            .highlight(summary.leaderboard_rank().map(|rank| rank - 1))
            .render(layout[4], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [r] Play Again  ", Style::default().fg(colors.accent())),
            Span::styled("[h] High Scores  ", Style::default().fg(colors.accent())),
            Span::styled("[q/Esc] Menu", Style::default().fg(colors.accent())),
        ]))
        .render(layout[5], buf);
    }
}
