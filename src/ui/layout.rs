use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutTier {
    Wide,   // ≥80 cols: quiz area + leaderboard sidebar
    Narrow, // <80 cols: quiz area only
}

impl LayoutTier {
    pub fn from_area(area: Rect) -> Self {
        if area.width >= 80 {
            LayoutTier::Wide
        } else {
            LayoutTier::Narrow
        }
    }

    pub fn show_sidebar(&self) -> bool {
        *self == LayoutTier::Wide
    }
}

/// Header with score and level, the quiz body, and a footer of key hints.
pub struct AppLayout {
    pub header: Rect,
    pub time_bar: Rect,
    pub main: Rect,
    pub sidebar: Option<Rect>,
    pub footer: Rect,
    pub tier: LayoutTier,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let tier = LayoutTier::from_area(area);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(1),
            ])
            .split(area);

        let (main, sidebar) = if tier.show_sidebar() {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(vertical[2]);
            (horizontal[0], Some(horizontal[1]))
        } else {
            (vertical[2], None)
        };

        Self {
            header: vertical[0],
            time_bar: vertical[1],
            main,
            sidebar,
            footer: vertical[3],
            tier,
        }
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 7;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_only_when_wide() {
        let wide = AppLayout::new(Rect::new(0, 0, 120, 30));
        assert_eq!(wide.tier, LayoutTier::Wide);
        assert!(wide.sidebar.is_some());

        let narrow = AppLayout::new(Rect::new(0, 0, 60, 30));
        assert_eq!(narrow.tier, LayoutTier::Narrow);
        assert!(narrow.sidebar.is_none());
        assert_eq!(narrow.main.width, 60);
    }

    #[test]
    fn test_centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 30, 5);
        let popup = centered_rect(50, 50, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);

        let big = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, big);
        assert_eq!(popup, Rect::new(25, 10, 50, 20));
    }
}
