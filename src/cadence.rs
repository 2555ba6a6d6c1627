//! The cadence sequencer: the timed engine behind one exercise run.
//!
//! One run is a linear choreography:
//!
//! ```text
//! Idle -> Countdown(3,2,1) -> Rep[1..10]{ Up(1..5) -> Down(5..1) } -> Finished
//! ```
//!
//! The sequencer is a plain value with a single pending due instant. Callers
//! drive it by polling with the current instant; every step past its due
//! time advances the machine and emits presentation events, with cue tones
//! pushed to the sink as they occur. There are no callbacks or background
//! timers, so cancelling (or just dropping the value) structurally
//! guarantees that no stale tick can fire afterwards.
//!
//! Steps are re-anchored on their own due instants, not on poll times, so a
//! slow poll cadence catches up without drifting.

use std::time::{Duration, Instant};

/// Countdown starts here and counts to 1.
pub const COUNTDOWN_START: u8 = 3;

/// Repetitions per run. Fixed, not configurable.
pub const REPS: u8 = 10;

/// Ticks per up/down sub-phase.
pub const PHASE_TICKS: u8 = 5;

const STEP: Duration = Duration::from_secs(1);

/// Direction of a rep sub-phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The rising count, paired with the "raised" visual state.
    Up,
    /// The falling count, paired with the "lowered" visual state.
    Down,
}

/// Where the sequencer currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Started but no tick processed yet.
    Idle,

    /// Counting down; `remaining` is the number on screen.
    Countdown { remaining: u8 },

    /// Inside rep `rep`, showing `count`.
    Rep { rep: u8, direction: Direction, count: u8 },

    /// Terminal: the run completed.
    Finished,

    /// Terminal: the run was aborted.
    Cancelled,
}

/// Presentation events, consumed by the screen layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceEvent {
    CountdownTick(u8),
    Go,
    PhaseEnter { rep: u8, direction: Direction },
    RepTick { rep: u8, direction: Direction, count: u8 },
    Finished,
    Cancelled,
}

/// Audio cues, one per cue-worthy transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Countdown reached zero. Short high tone.
    Go,
    /// An up sub-phase was entered. High tone.
    RepUp,
    /// A down sub-phase was entered. Low tone.
    RepDown,
}

/// A tone request handed to the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRequest {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    pub waveform: Waveform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

impl Cue {
    /// The tone this cue requests from the generator.
    pub fn tone(self) -> ToneRequest {
        match self {
            Self::Go => ToneRequest {
                frequency_hz: 880.0,
                duration_ms: 150,
                waveform: Waveform::Square,
            },
            Self::RepUp => ToneRequest {
                frequency_hz: 880.0,
                duration_ms: 150,
                waveform: Waveform::Sine,
            },
            Self::RepDown => ToneRequest {
                frequency_hz: 440.0,
                duration_ms: 150,
                waveform: Waveform::Sine,
            },
        }
    }
}

/// Where tone requests go. The sequencer always emits; whether anything is
/// audible is the sink's business.
pub trait ToneSink {
    fn play(&mut self, tone: &ToneRequest);
}

/// Sink for sound-off mode: every request is accepted and dropped.
pub struct MutedSink;

impl ToneSink for MutedSink {
    fn play(&mut self, _tone: &ToneRequest) {}
}

/// The cadence state machine for one exercise run.
pub struct Sequencer {
    phase: Phase,
    due: Option<Instant>,
}

impl Sequencer {
    /// Starts a run. The first countdown tick is due immediately, so the
    /// caller's next poll emits it.
    pub fn start(now: Instant) -> Self {
        Self {
            phase: Phase::Idle,
            due: Some(now),
        }
    }

    /// Whether the run ended in `Finished`.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished)
    }

    /// Whether ticks are still pending.
    pub fn is_running(&self) -> bool {
        self.due.is_some()
    }

    /// Processes every step due at `now`, in order. Returns the emitted
    /// presentation events; cue tones go to the sink as they occur.
    pub fn poll(&mut self, now: Instant, sink: &mut dyn ToneSink) -> Vec<CadenceEvent> {
        let mut events = Vec::new();
        while let Some(due) = self.due {
            if due > now {
                break;
            }
            self.advance(&mut events, sink);
            self.due = match self.phase {
                Phase::Finished | Phase::Cancelled => None,
                _ => Some(due + STEP),
            };
        }
        events
    }

    /// Aborts the run from any state: the pending schedule is cleared so no
    /// further tick can fire, and no completion event will ever be emitted.
    ///
    /// Returns the `Cancelled` event, or `None` when the run had already
    /// reached a terminal state.
    pub fn cancel(&mut self) -> Option<CadenceEvent> {
        if matches!(self.phase, Phase::Finished | Phase::Cancelled) {
            return None;
        }
        self.phase = Phase::Cancelled;
        self.due = None;
        Some(CadenceEvent::Cancelled)
    }

    /// One step of the machine.
    fn advance(&mut self, events: &mut Vec<CadenceEvent>, sink: &mut dyn ToneSink) {
        match self.phase {
            Phase::Idle => {
                self.phase = Phase::Countdown {
                    remaining: COUNTDOWN_START,
                };
                events.push(CadenceEvent::CountdownTick(COUNTDOWN_START));
            }

            Phase::Countdown { remaining } if remaining > 1 => {
                self.phase = Phase::Countdown {
                    remaining: remaining - 1,
                };
                events.push(CadenceEvent::CountdownTick(remaining - 1));
            }

            // Countdown reached zero: go, and rep 1 starts on the same step.
            Phase::Countdown { .. } => {
                events.push(CadenceEvent::Go);
                sink.play(&Cue::Go.tone());
                self.enter_sub_phase(1, Direction::Up, events, sink);
            }

            Phase::Rep {
                rep,
                direction: Direction::Up,
                count,
            } => {
                if count < PHASE_TICKS {
                    self.phase = Phase::Rep {
                        rep,
                        direction: Direction::Up,
                        count: count + 1,
                    };
                    events.push(CadenceEvent::RepTick {
                        rep,
                        direction: Direction::Up,
                        count: count + 1,
                    });
                } else {
                    self.enter_sub_phase(rep, Direction::Down, events, sink);
                }
            }

            Phase::Rep {
                rep,
                direction: Direction::Down,
                count,
            } => {
                if count > 1 {
                    self.phase = Phase::Rep {
                        rep,
                        direction: Direction::Down,
                        count: count - 1,
                    };
                    events.push(CadenceEvent::RepTick {
                        rep,
                        direction: Direction::Down,
                        count: count - 1,
                    });
                } else if rep < REPS {
                    self.enter_sub_phase(rep + 1, Direction::Up, events, sink);
                } else {
                    self.phase = Phase::Finished;
                    events.push(CadenceEvent::Finished);
                }
            }

            // Terminal states never reach advance: their due slot is cleared.
            Phase::Finished | Phase::Cancelled => {}
        }
    }

    /// Enters an up or down sub-phase: cue, enter event, and the first tick,
    /// all on the same step.
    fn enter_sub_phase(
        &mut self,
        rep: u8,
        direction: Direction,
        events: &mut Vec<CadenceEvent>,
        sink: &mut dyn ToneSink,
    ) {
        let count = match direction {
            Direction::Up => 1,
            Direction::Down => PHASE_TICKS,
        };
        let cue = match direction {
            Direction::Up => Cue::RepUp,
            Direction::Down => Cue::RepDown,
        };

        self.phase = Phase::Rep {
            rep,
            direction,
            count,
        };
        events.push(CadenceEvent::PhaseEnter { rep, direction });
        sink.play(&cue.tone());
        events.push(CadenceEvent::RepTick {
            rep,
            direction,
            count,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink that records every tone it is asked to play.
    #[derive(Default)]
    struct RecordingSink {
        tones: Vec<ToneRequest>,
    }

    impl ToneSink for RecordingSink {
        fn play(&mut self, tone: &ToneRequest) {
            self.tones.push(*tone);
        }
    }

    fn at(base: Instant, seconds: u64) -> Instant {
        base + Duration::from_secs(seconds)
    }

    /// Runs the whole sequence on virtual time, polling once per second,
    /// and returns everything emitted.
    fn full_run(sink: &mut RecordingSink) -> Vec<CadenceEvent> {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);
        let mut events = Vec::new();
        for second in 0..=103 {
            events.extend(seq.poll(at(base, second), sink));
        }
        assert!(seq.is_finished());
        events
    }

    #[test]
    fn full_run_emits_the_exact_event_counts() {
        let mut sink = RecordingSink::default();
        let events = full_run(&mut sink);

        let countdowns = events
            .iter()
            .filter(|e| matches!(e, CadenceEvent::CountdownTick(_)))
            .count();
        let gos = events.iter().filter(|e| matches!(e, CadenceEvent::Go)).count();
        let rep_ticks = events
            .iter()
            .filter(|e| matches!(e, CadenceEvent::RepTick { .. }))
            .count();
        let enters = events
            .iter()
            .filter(|e| matches!(e, CadenceEvent::PhaseEnter { .. }))
            .count();
        let finishes = events
            .iter()
            .filter(|e| matches!(e, CadenceEvent::Finished))
            .count();

        assert_eq!(countdowns, 3);
        assert_eq!(gos, 1);
        assert_eq!(rep_ticks, 100);
        assert_eq!(enters, 20);
        assert_eq!(finishes, 1);
        // The scheduled presentation stream: 3 + 1 + 100 + 1.
        assert_eq!(countdowns + gos + rep_ticks + finishes, 105);
        assert!(!events.contains(&CadenceEvent::Cancelled));
    }

    #[test]
    fn full_run_cues_go_plus_one_per_sub_phase() {
        let mut sink = RecordingSink::default();
        full_run(&mut sink);

        assert_eq!(sink.tones.len(), 21);
        // Go is the square high tone; up/down alternate sine high/low.
        assert_eq!(sink.tones[0], Cue::Go.tone());
        assert_eq!(sink.tones[1], Cue::RepUp.tone());
        assert_eq!(sink.tones[2], Cue::RepDown.tone());
        let down_count = sink
            .tones
            .iter()
            .filter(|t| *t == &Cue::RepDown.tone())
            .count();
        assert_eq!(down_count, 10);
    }

    #[test]
    fn timeline_is_second_exact() {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);
        let mut sink = MutedSink;

        assert_eq!(
            seq.poll(at(base, 0), &mut sink),
            vec![CadenceEvent::CountdownTick(3)]
        );
        assert_eq!(
            seq.poll(at(base, 1), &mut sink),
            vec![CadenceEvent::CountdownTick(2)]
        );
        assert_eq!(
            seq.poll(at(base, 2), &mut sink),
            vec![CadenceEvent::CountdownTick(1)]
        );

        // Go, rep 1 up entry, and its first tick share a step.
        assert_eq!(
            seq.poll(at(base, 3), &mut sink),
            vec![
                CadenceEvent::Go,
                CadenceEvent::PhaseEnter {
                    rep: 1,
                    direction: Direction::Up
                },
                CadenceEvent::RepTick {
                    rep: 1,
                    direction: Direction::Up,
                    count: 1
                },
            ]
        );

        // Up counts rise through 5 at one-second spacing.
        for count in 2..=5 {
            assert_eq!(
                seq.poll(at(base, 2 + u64::from(count)), &mut sink),
                vec![CadenceEvent::RepTick {
                    rep: 1,
                    direction: Direction::Up,
                    count
                }]
            );
        }

        // The down sub-phase starts at its entry count of 5 and falls.
        assert_eq!(
            seq.poll(at(base, 8), &mut sink),
            vec![
                CadenceEvent::PhaseEnter {
                    rep: 1,
                    direction: Direction::Down
                },
                CadenceEvent::RepTick {
                    rep: 1,
                    direction: Direction::Down,
                    count: 5
                },
            ]
        );

        // Rep 2 begins exactly ten seconds after rep 1.
        let mut events = Vec::new();
        for second in 9..=13 {
            events = seq.poll(at(base, second), &mut sink);
        }
        assert_eq!(
            events,
            vec![
                CadenceEvent::PhaseEnter {
                    rep: 2,
                    direction: Direction::Up
                },
                CadenceEvent::RepTick {
                    rep: 2,
                    direction: Direction::Up,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn run_finishes_after_one_hundred_three_seconds() {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);
        let mut sink = MutedSink;

        let early = seq.poll(at(base, 102), &mut sink);
        assert!(!early.contains(&CadenceEvent::Finished));
        assert!(seq.is_running());

        let last = seq.poll(at(base, 103), &mut sink);
        assert_eq!(last, vec![CadenceEvent::Finished]);
        assert!(seq.is_finished());
        assert!(!seq.is_running());

        // Nothing fires after the terminal state.
        assert!(seq.poll(at(base, 1000), &mut sink).is_empty());
    }

    #[test]
    fn slow_polls_catch_up_without_drifting() {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);
        let mut sink = RecordingSink::default();

        // A single late poll replays the whole backlog in order.
        let events = seq.poll(at(base, 103), &mut sink);
        let ticks = events
            .iter()
            .filter(|e| matches!(e, CadenceEvent::RepTick { .. }))
            .count();
        assert_eq!(ticks, 100);
        assert_eq!(events.last(), Some(&CadenceEvent::Finished));
        assert_eq!(sink.tones.len(), 21);
    }

    #[test]
    fn poll_before_due_emits_nothing() {
        let base = Instant::now();
        let mut seq = Sequencer::start(at(base, 5));
        let mut sink = MutedSink;

        assert!(seq.poll(base, &mut sink).is_empty());
        assert!(seq.is_running());
    }

    #[test]
    fn cancel_stops_every_pending_tick() {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);
        let mut sink = RecordingSink::default();
        seq.poll(at(base, 10), &mut sink);

        assert_eq!(seq.cancel(), Some(CadenceEvent::Cancelled));
        assert!(!seq.is_running());

        // No tick, cue, or completion can fire after cancellation.
        let tones_at_cancel = sink.tones.len();
        let after = seq.poll(at(base, 1000), &mut sink);
        assert!(after.is_empty());
        assert_eq!(sink.tones.len(), tones_at_cancel);
        assert!(!seq.is_finished());
    }

    #[test]
    fn cancel_at_every_tick_never_finishes() {
        let base = Instant::now();
        let mut sink = MutedSink;
        for cancel_at in 0..=104 {
            let mut seq = Sequencer::start(base);
            let mut finished = false;
            for second in 0..cancel_at {
                let events = seq.poll(at(base, second), &mut sink);
                finished |= events.contains(&CadenceEvent::Finished);
            }
            if finished {
                // Cancelling after natural completion is a no-op.
                assert_eq!(seq.cancel(), None);
                continue;
            }
            assert_eq!(seq.cancel(), Some(CadenceEvent::Cancelled));
            assert!(seq.poll(at(base, 1000), &mut sink).is_empty());
            assert!(!seq.is_finished());
        }
    }

    #[test]
    fn cancel_is_idempotent() {
        let base = Instant::now();
        let mut seq = Sequencer::start(base);

        assert_eq!(seq.cancel(), Some(CadenceEvent::Cancelled));
        assert_eq!(seq.cancel(), None);
    }

    #[test]
    fn muted_sink_changes_nothing_but_the_audio() {
        let base = Instant::now();
        let mut muted = Sequencer::start(base);
        let mut sounded = Sequencer::start(base);
        let mut sink = RecordingSink::default();

        for second in 0..=103 {
            let a = muted.poll(at(base, second), &mut MutedSink);
            let b = sounded.poll(at(base, second), &mut sink);
            assert_eq!(a, b);
        }
        assert!(muted.is_finished() && sounded.is_finished());
    }
}
