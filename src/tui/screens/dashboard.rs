//! Dashboard screen: today's resolved training and the override list.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};

use crate::model::{Rotation, Training};

/// One startable entry: today's resolved plan or an explicit override.
struct DashboardItem {
    training_id: String,
    label: String,
}

pub struct DashboardScreen {
    /// What the header says about today.
    today_line: String,
    items: Vec<DashboardItem>,
    selected: usize,
}

impl DashboardScreen {
    /// Builds the dashboard from the rotation and the plan list.
    ///
    /// A missing rotation or a slot pointing at an unknown plan becomes a
    /// visible "unknown plan" header; the overrides still work.
    pub fn new(rotation: Option<&Rotation>, trainings: &[Training], today_day: i8) -> Self {
        let resolved_id = rotation.map(|r| r.slot_for_day(today_day).to_string());
        let resolved = resolved_id
            .as_deref()
            .and_then(|id| trainings.iter().find(|t| t.id == id));

        let today_line = match (&resolved_id, resolved) {
            (_, Some(t)) => format!("Today: {}", t.title),
            (Some(id), None) => format!("Today: unknown plan '{id}'"),
            (None, None) => "Today: no rotation configured".to_string(),
        };

        let mut items = Vec::new();
        if let Some(t) = resolved {
            items.push(DashboardItem {
                training_id: t.id.clone(),
                label: format!("Start today's training — {}", t.title),
            });
        }
        for t in trainings {
            items.push(DashboardItem {
                training_id: t.id.clone(),
                label: format!("Override: {}", t.title),
            });
        }

        Self {
            today_line,
            items,
            selected: 0,
        }
    }

    pub fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    /// The training id to start, if anything is selectable.
    pub fn select(&self) -> Option<&str> {
        self.items
            .get(self.selected)
            .map(|item| item.training_id.as_str())
    }

    pub fn render(&self, frame: &mut Frame, notice: Option<&str>) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // title
            Constraint::Length(2), // today line
            Constraint::Min(0),    // list
            Constraint::Length(1), // notice
            Constraint::Length(1), // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let title = Paragraph::new(Line::from(vec![Span::styled("replog", highlight)]))
            .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, chunks[0]);

        let today = Paragraph::new(Line::from(vec![Span::styled(&self.today_line, normal)]))
            .block(Block::default().padding(Padding::new(2, 0, 0, 0)));
        frame.render_widget(today, chunks[1]);

        let list_items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == self.selected { highlight } else { normal };
                let pointer = if i == self.selected { "› " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(pointer, style),
                    Span::styled(&item.label, style),
                ]))
            })
            .collect();
        let list = List::new(list_items).block(Block::default().padding(Padding::new(2, 2, 0, 0)));
        frame.render_widget(list, chunks[2]);

        if let Some(notice) = notice {
            let line = Paragraph::new(Line::from(vec![Span::styled(
                format!(" {notice}"),
                Style::default().fg(Color::Red),
            )]));
            frame.render_widget(line, chunks[3]);
        }

        let help = Paragraph::new(Line::from(vec![Span::styled(
            " ↑↓ navigate  ⏎ start  q quit",
            muted,
        )]));
        frame.render_widget(help, chunks[4]);
    }
}
