use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartQuiz,
    HighScores,
    Quit,
}

pub struct MenuItem {
    pub key: char,
    pub label: &'static str,
    pub description: &'static str,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub player_name: String,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    pub fn new(player_name: &str, theme: &'a Theme) -> Self {
        Self {
            items: vec![
                MenuItem {
                    key: '1',
                    label: "Start Quiz",
                    description: "Answer as many questions as you can before time runs out",
                    action: MenuAction::StartQuiz,
                },
                MenuItem {
                    key: 'h',
                    label: "High Scores",
                    description: "Best score and the top of the leaderboard",
                    action: MenuAction::HighScores,
                },
                MenuItem {
                    key: 'q',
                    label: "Quit",
                    description: "Leave quickmath",
                    action: MenuAction::Quit,
                },
            ],
            selected: 0,
            player_name: player_name.to_string(),
            theme,
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items
            .get(self.selected)
            .map(|item| item.action)
            .unwrap_or(MenuAction::StartQuiz)
    }

    pub fn action_for_key(&self, key: char) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.action)
    }
}

impl Widget for &Menu<'_> {
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
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "quickmath",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Welcome, {}!", self.player_name),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(3))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", item.key, item.label);
            let desc_text = format!("     {}", item.description);

            let label_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };

            let lines = vec![
                Line::from(Span::styled(label_text, label_style)),
                Line::from(Span::styled(desc_text, Style::default().fg(colors.muted()))),
            ];

            if let Some(slot) = menu_layout.get(i) {
                Paragraph::new(lines).render(*slot, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_wraps() {
        let theme = Theme::default();
        let mut menu = Menu::new("Guest", &theme);
        assert_eq!(menu.selected_action(), MenuAction::StartQuiz);
        menu.prev();
        assert_eq!(menu.selected_action(), MenuAction::Quit);
        menu.next();
        menu.next();
        assert_eq!(menu.selected_action(), MenuAction::HighScores);
    }

    #[test]
    fn test_action_for_key() {
        let theme = Theme::default();
        let menu = Menu::new("Guest", &theme);
        assert_eq!(menu.action_for_key('1'), Some(MenuAction::StartQuiz));
        assert_eq!(menu.action_for_key('h'), Some(MenuAction::HighScores));
        assert_eq!(menu.action_for_key('x'), None);
    }
}
