//! Application loop and screen routing.
//!
//! The loop alternates input polling with a short timeout and a timer pump,
//! so cadence ticks and the rest-timer readout advance even when no key
//! arrives. All timed state lives in owned slots on the app: at most one
//! session, one rest timer, and (inside the exercise screen) one sequencer.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use jiff::{Timestamp, Zoned};
use ratatui::{DefaultTerminal, Frame};

use crate::cadence::{MutedSink, ToneRequest, ToneSink};
use crate::config::Config;
use crate::session::{CompletionOutcome, Session, SessionError};
use crate::store::Store;
use crate::timer::RestTimer;

use super::screens::{DashboardScreen, ExerciseScreen, PickerAction, PickerScreen};

/// How often the loop wakes to pump timers when no key arrives.
const FRAME: Duration = Duration::from_millis(100);

/// Which screen is currently displayed.
enum Screen {
    Dashboard(DashboardScreen),
    Picker(PickerScreen),
    Exercise(ExerciseScreen),
}

/// Rings the terminal bell for every cue. The requested pitch is up to the
/// terminal; the cue timing is what matters at the gym.
struct BellSink;

impl ToneSink for BellSink {
    fn play(&mut self, _tone: &ToneRequest) {
        let mut out = io::stdout();
        let _ = out.write_all(b"\x07");
        let _ = out.flush();
    }
}

/// Runs the TUI event loop until the user quits.
pub fn run(store: &Store, config: &Config) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, store, config);
    ratatui::restore();
    result
}

struct App<'a> {
    store: &'a Store,
    sink: Box<dyn ToneSink>,
    screen: Screen,
    session: Option<Session>,
    rest_timer: Option<RestTimer>,
    /// User-visible refusal line on the dashboard (e.g. unknown plan).
    notice: Option<String>,
}

fn event_loop(terminal: &mut DefaultTerminal, store: &Store, config: &Config) -> io::Result<()> {
    let mut app = App {
        store,
        sink: if config.sound {
            Box::new(BellSink)
        } else {
            Box::new(MutedSink)
        },
        screen: Screen::Dashboard(dashboard(store)),
        session: None,
        rest_timer: None,
        notice: None,
    };

    loop {
        app.pump(Instant::now());
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(FRAME)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.on_key(key.code)? {
                return Ok(());
            }
        }
    }
}

fn dashboard(store: &Store) -> DashboardScreen {
    DashboardScreen::new(
        store.rotation().as_ref(),
        &store.trainings(),
        Zoned::now().date().day(),
    )
}

impl App<'_> {
    /// Advances due cadence ticks before each frame.
    fn pump(&mut self, now: Instant) {
        if let Screen::Exercise(screen) = &mut self.screen {
            screen.tick(now, self.sink.as_mut());
        }
    }

    fn render(&self, frame: &mut Frame) {
        match &self.screen {
            Screen::Dashboard(s) => s.render(frame, self.notice.as_deref()),
            Screen::Picker(s) => {
                if let Some(session) = &self.session {
                    let rest = self
                        .rest_timer
                        .as_ref()
                        .map_or_else(|| "00:00".to_string(), |t| t.display(Instant::now()));
                    s.render(frame, session, &rest);
                }
            }
            Screen::Exercise(s) => s.render(frame),
        }
    }

    /// Handles one key press. Returns whether the app should quit.
    fn on_key(&mut self, code: KeyCode) -> io::Result<bool> {
        match &mut self.screen {
            Screen::Dashboard(dash) => match code {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Up | KeyCode::Char('k') => dash.move_up(),
                KeyCode::Down | KeyCode::Char('j') => dash.move_down(),
                KeyCode::Enter => {
                    if let Some(id) = dash.select() {
                        let id = id.to_string();
                        self.start_session(&id);
                    }
                }
                _ => {}
            },

            Screen::Picker(picker) => match code {
                KeyCode::Char('q') => return Ok(true),
                KeyCode::Up | KeyCode::Char('k') => picker.move_up(),
                KeyCode::Down | KeyCode::Char('j') => picker.move_down(),
                KeyCode::Enter => match picker.select() {
                    Some(PickerAction::OpenExercise(id)) => {
                        self.screen = Screen::Exercise(ExerciseScreen::new(self.store, &id));
                    }
                    Some(PickerAction::EndSession) => self.end_session(),
                    None => {}
                },
                _ => {}
            },

            Screen::Exercise(exercise) => match code {
                KeyCode::Esc => {
                    if exercise.run_active() {
                        // Abandon mid-run. The rest clock keeps its anchor.
                        exercise.cancel_run();
                    } else {
                        self.back_to_picker();
                    }
                }
                KeyCode::Enter => {
                    if exercise.run_finished() {
                        self.save_and_next()?;
                    } else if !exercise.run_active() {
                        exercise.start_run(Instant::now());
                    }
                }
                KeyCode::Tab => {
                    if !exercise.run_active() {
                        exercise.cycle_difficulty();
                    }
                }
                KeyCode::Backspace => {
                    if !exercise.run_active() {
                        exercise.pop_load_char();
                    }
                }
                KeyCode::Char(c) => {
                    if !exercise.run_active() {
                        exercise.push_load_char(c);
                    }
                }
                _ => {}
            },
        }
        Ok(false)
    }

    fn start_session(&mut self, training_id: &str) {
        match Session::start(self.store, training_id, Timestamp::now()) {
            Ok(session) => {
                // One live rest timer: replacing the slot stops the old one.
                self.rest_timer = Some(RestTimer::start(Instant::now()));
                self.screen = Screen::Picker(PickerScreen::new(self.store, &session));
                self.session = Some(session);
                self.notice = None;
            }
            Err(err @ SessionError::PlanNotFound(_)) => {
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Discards the session unconditionally. Unfinished exercises leave no
    /// trace.
    fn end_session(&mut self) {
        self.session = None;
        self.rest_timer = None;
        self.notice = None;
        self.screen = Screen::Dashboard(dashboard(self.store));
    }

    fn back_to_picker(&mut self) {
        if let Some(session) = &self.session {
            self.screen = Screen::Picker(PickerScreen::new(self.store, session));
        } else {
            self.screen = Screen::Dashboard(dashboard(self.store));
        }
    }

    fn save_and_next(&mut self) -> io::Result<()> {
        let Screen::Exercise(exercise) = &self.screen else {
            return Ok(());
        };
        let Some(session) = &mut self.session else {
            return Ok(());
        };

        let outcome = session
            .complete_exercise(
                self.store,
                exercise.exercise_id(),
                exercise.load().trim(),
                exercise.difficulty(),
                Timestamp::now(),
            )
            .map_err(io::Error::other)?;

        if outcome == CompletionOutcome::Logged
            && let Some(timer) = &mut self.rest_timer
        {
            timer.restart(Instant::now());
        }
        self.screen = Screen::Picker(PickerScreen::new(self.store, session));
        Ok(())
    }
}
