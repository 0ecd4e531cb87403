use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use quickmath::generator::Question;

use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Bonus,
    Incorrect,
    LevelUp,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

pub struct QuizArea<'a> {
    question: Option<&'a Question>,
    input: &'a LineInput,
    feedback: Option<&'a Feedback>,
    theme: &'a Theme,
}

impl<'a> QuizArea<'a> {
    pub fn new(
        question: Option<&'a Question>,
        input: &'a LineInput,
        feedback: Option<&'a Feedback>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            question,
            input,
            feedback,
            theme,
        }
    }
}

impl Widget for QuizArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let question_text = match self.question {
            Some(q) => format!("{q} = ?"),
            None => String::new(),
        };
        Paragraph::new(Line::from(Span::styled(
            question_text,
            Style::default()
                .fg(colors.question())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        let (before, cursor, after) = self.input.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(colors.accent())),
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
        ];
        match cursor {
            Some(ch) => {
                spans.push(Span::styled(ch.to_string(), cursor_style));
                spans.push(Span::styled(after.to_string(), Style::default().fg(colors.fg())));
            }
            None => spans.push(Span::styled(" ", cursor_style)),
        }
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(layout[2], buf);

        if let Some(feedback) = self.feedback {
            let color = match feedback.kind {
                FeedbackKind::Bonus => colors.success(),
                FeedbackKind::Incorrect => colors.error(),
                FeedbackKind::LevelUp => colors.accent(),
            };
            Paragraph::new(Line::from(Span::styled(
                feedback.text.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(layout[3], buf);
        }
    }
}
