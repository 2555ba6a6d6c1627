//! Picker screen: the session queue, the rest timer, and the summary.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Padding, Paragraph};

use crate::session::Session;
use crate::store::Store;

/// What the picker wants to happen when the user presses Enter.
pub enum PickerAction {
    OpenExercise(String),
    EndSession,
}

/// One selectable row.
struct PickerItem {
    exercise_id: Option<String>,
    label: String,
}

pub struct PickerScreen {
    training_title: String,
    items: Vec<PickerItem>,
    selected: usize,
}

impl PickerScreen {
    /// Builds the picker from the live session. Rebuilt after every
    /// completion, so the labels always match the remaining queue.
    pub fn new(store: &Store, session: &Session) -> Self {
        let training_title = store
            .training(&session.training_id)
            .map_or_else(|| session.training_id.clone(), |t| t.title);

        let exercises = store.exercises();
        let mut items: Vec<PickerItem> = session
            .exercise_queue
            .iter()
            .map(|id| {
                let name = exercises
                    .iter()
                    .find(|e| &e.id == id)
                    .map_or_else(|| id.clone(), |e| e.name.clone());
                PickerItem {
                    exercise_id: Some(id.clone()),
                    label: name,
                }
            })
            .collect();
        items.push(PickerItem {
            exercise_id: None,
            label: "End session".to_string(),
        });

        Self {
            training_title,
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

    pub fn select(&self) -> Option<PickerAction> {
        self.items.get(self.selected).map(|item| {
            item.exercise_id.as_ref().map_or(PickerAction::EndSession, |id| {
                PickerAction::OpenExercise(id.clone())
            })
        })
    }

    /// `rest` is the formatted rest-timer readout for this frame.
    pub fn render(&self, frame: &mut Frame, session: &Session, rest: &str) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Length(2), // rest timer
            Constraint::Min(0),    // queue or summary
            Constraint::Length(1), // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let header = Paragraph::new(Line::from(vec![Span::styled(
            &self.training_title,
            highlight,
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(header, chunks[0]);

        let rest_line = Paragraph::new(Line::from(vec![Span::styled(
            format!("Rest: {rest}"),
            normal,
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 0, 0)));
        frame.render_widget(rest_line, chunks[1]);

        let mut list_items: Vec<ListItem> = Vec::new();
        if session.is_complete() {
            list_items.push(ListItem::new(Line::from(vec![Span::styled(
                "All done!",
                highlight,
            )])));
            for result in &session.results {
                let load = if result.load.is_empty() {
                    "—"
                } else {
                    result.load.as_str()
                };
                list_items.push(ListItem::new(Line::from(vec![
                    Span::styled(format!("  {}", result.name), normal),
                    Span::styled(format!("  {load}"), muted),
                    Span::styled(format!("  {}", result.difficulty.as_str()), muted),
                ])));
            }
            list_items.push(ListItem::new(Line::raw("")));
        }
        for (i, item) in self.items.iter().enumerate() {
            let style = if i == self.selected { highlight } else { normal };
            let pointer = if i == self.selected { "› " } else { "  " };
            list_items.push(ListItem::new(Line::from(vec![
                Span::styled(pointer, style),
                Span::styled(&item.label, style),
            ])));
        }
        let list = List::new(list_items).block(Block::default().padding(Padding::new(2, 2, 0, 0)));
        frame.render_widget(list, chunks[2]);

        let help = Paragraph::new(Line::from(vec![Span::styled(
            " ↑↓ navigate  ⏎ select  q quit",
            muted,
        )]));
        frame.render_widget(help, chunks[3]);
    }
}
