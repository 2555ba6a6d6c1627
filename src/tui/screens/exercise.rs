//! Exercise screen: load and difficulty entry, and the cadence run.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::cadence::{CadenceEvent, Direction, Sequencer, ToneSink};
use crate::model::Difficulty;
use crate::store::Store;

/// What the cadence area currently shows, fed from sequencer events.
///
/// The screen renders this view, not the sequencer's internal phase; the
/// sequencer stays the single writer through its event stream.
#[derive(Debug, Default)]
struct CadenceView {
    /// The big text: countdown digit, "GO", "Done!", or "Cancelled".
    banner: String,
    phase_label: &'static str,
    rep: Option<u8>,
    direction: Option<Direction>,
    count: Option<u8>,
}

impl CadenceView {
    fn apply(&mut self, event: CadenceEvent) {
        match event {
            CadenceEvent::CountdownTick(n) => {
                self.banner = n.to_string();
                self.phase_label = "Ready…";
                self.rep = None;
                self.direction = None;
                self.count = None;
            }
            CadenceEvent::Go => {
                self.banner = "GO".to_string();
            }
            CadenceEvent::PhaseEnter { rep, direction } => {
                self.rep = Some(rep);
                self.direction = Some(direction);
                self.phase_label = match direction {
                    Direction::Up => "Up",
                    Direction::Down => "Down",
                };
            }
            CadenceEvent::RepTick { count, .. } => {
                self.count = Some(count);
            }
            CadenceEvent::Finished => {
                self.banner = "Done!".to_string();
                self.phase_label = "Done";
            }
            CadenceEvent::Cancelled => {
                self.banner = "Cancelled".to_string();
                self.phase_label = "";
            }
        }
    }
}

pub struct ExerciseScreen {
    exercise_id: String,
    name: String,
    load: String,
    difficulty: Option<Difficulty>,
    sequencer: Option<Sequencer>,
    view: CadenceView,
}

impl ExerciseScreen {
    /// Opens an exercise, prefilling load and difficulty from its most
    /// recent log.
    pub fn new(store: &Store, exercise_id: &str) -> Self {
        let name = store
            .exercise(exercise_id)
            .map_or_else(|| exercise_id.to_string(), |e| e.name);
        let last = store.last_log_for(exercise_id);

        Self {
            exercise_id: exercise_id.to_string(),
            name,
            load: last.as_ref().map_or_else(String::new, |l| l.load.clone()),
            difficulty: last.map(|l| l.difficulty),
            sequencer: None,
            view: CadenceView::default(),
        }
    }

    pub fn exercise_id(&self) -> &str {
        &self.exercise_id
    }

    pub fn load(&self) -> &str {
        &self.load
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Whether a run is live (ticks pending).
    pub fn run_active(&self) -> bool {
        self.sequencer.as_ref().is_some_and(Sequencer::is_running)
    }

    /// Whether the run completed, which unlocks save-and-next.
    pub fn run_finished(&self) -> bool {
        self.sequencer.as_ref().is_some_and(Sequencer::is_finished)
    }

    /// Starts (or restarts) the cadence. Replacing the slot tears down any
    /// previous run, so two tick streams can never overlap.
    pub fn start_run(&mut self, now: Instant) {
        self.view = CadenceView::default();
        self.sequencer = Some(Sequencer::start(now));
    }

    /// Aborts the run. The exercise stays in the queue; nothing is logged.
    pub fn cancel_run(&mut self) {
        if let Some(seq) = &mut self.sequencer
            && let Some(event) = seq.cancel()
        {
            self.view.apply(event);
        }
    }

    /// Pumps due ticks into the view. Called once per frame.
    pub fn tick(&mut self, now: Instant, sink: &mut dyn ToneSink) {
        if let Some(seq) = &mut self.sequencer {
            for event in seq.poll(now, sink) {
                self.view.apply(event);
            }
        }
    }

    pub fn push_load_char(&mut self, c: char) {
        self.load.push(c);
    }

    pub fn pop_load_char(&mut self) {
        self.load.pop();
    }

    /// Cycles Easy → OK → Hard. Unset starts at Easy; saving while unset
    /// falls back to OK.
    pub fn cycle_difficulty(&mut self) {
        self.difficulty = Some(match self.difficulty {
            None | Some(Difficulty::Hard) => Difficulty::Easy,
            Some(Difficulty::Easy) => Difficulty::Ok,
            Some(Difficulty::Ok) => Difficulty::Hard,
        });
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Length(2), // load input
            Constraint::Length(2), // difficulty selector
            Constraint::Min(0),    // cadence area
            Constraint::Length(1), // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let header = Paragraph::new(Line::from(vec![Span::styled(&self.name, highlight)]))
            .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(header, chunks[0]);

        let load = Paragraph::new(Line::from(vec![
            Span::styled("Load: ", muted),
            Span::styled(&self.load, normal),
            Span::styled("▏", muted),
        ]))
        .block(Block::default().padding(Padding::new(2, 0, 0, 0)));
        frame.render_widget(load, chunks[1]);

        let mut difficulty_spans = vec![Span::styled("Felt: ", muted)];
        for d in [Difficulty::Easy, Difficulty::Ok, Difficulty::Hard] {
            let style = if self.difficulty == Some(d) {
                highlight
            } else {
                muted
            };
            difficulty_spans.push(Span::styled(format!("[{}] ", d.as_str()), style));
        }
        let difficulty = Paragraph::new(Line::from(difficulty_spans))
            .block(Block::default().padding(Padding::new(2, 0, 0, 0)));
        frame.render_widget(difficulty, chunks[2]);

        let mut cadence_lines = Vec::new();
        if self.sequencer.is_some() {
            cadence_lines.push(Line::from(vec![Span::styled(
                self.view.banner.clone(),
                highlight.fg(self.banner_color()),
            )]));
            if let (Some(rep), Some(count)) = (self.view.rep, self.view.count) {
                cadence_lines.push(Line::from(vec![
                    Span::styled(format!("Rep {rep} / 10   "), normal),
                    Span::styled(
                        format!("{} {count}", self.view.phase_label),
                        highlight.fg(self.direction_color()),
                    ),
                ]));
            } else {
                cadence_lines.push(Line::from(vec![Span::styled(
                    self.view.phase_label,
                    normal,
                )]));
            }
        } else {
            cadence_lines.push(Line::from(vec![Span::styled(
                "⏎ to start the cadence: 3s countdown, then 10 reps of 5s up / 5s down.",
                muted,
            )]));
        }
        let cadence = Paragraph::new(cadence_lines)
            .block(Block::default().padding(Padding::new(2, 2, 1, 0)));
        frame.render_widget(cadence, chunks[3]);

        let help = if self.run_active() {
            " esc cancel"
        } else if self.run_finished() {
            " ⏎ save and next  ⇥ felt  esc back"
        } else {
            " ⏎ start  ⇥ felt  type load  esc back"
        };
        let help_line = Paragraph::new(Line::from(vec![Span::styled(help, muted)]));
        frame.render_widget(help_line, chunks[4]);
    }

    fn banner_color(&self) -> Color {
        if self.run_finished() {
            Color::Green
        } else if self.run_active() {
            Color::White
        } else {
            Color::DarkGray
        }
    }

    fn direction_color(&self) -> Color {
        match self.view.direction {
            Some(Direction::Up) => Color::Green,
            Some(Direction::Down) => Color::Red,
            None => Color::Gray,
        }
    }
}
