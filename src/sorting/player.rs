//! Sort Player Module
//! Replays a recorded step script against animated bars. The player is
//! toolkit-free: the GUI feeds in wall-clock time each frame and reads back
//! bar positions and highlight states.

use crate::data::Student;
use crate::sorting::steps::{self, SortAlgorithm, SortStep};

/// Easing rate for bar glides, in slot-widths per second of remaining travel.
const EASE_RATE: f64 = 10.0;
/// Distance below which a gliding bar snaps onto its slot.
const SNAP_EPSILON: f64 = 0.005;

/// Highlight applied to a bar slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Base,
    /// Element whose position is being decided (or current minimum).
    Key,
    /// Under comparison right now.
    Compare,
    /// Settled into its final position.
    Settled,
    /// Everything sorted.
    Done,
}

/// One animated bar: a roster row plus its gliding x position.
#[derive(Debug, Clone)]
pub struct SortBar {
    pub id: i64,
    pub name: String,
    pub roll: String,
    pub marks: i64,
    /// Current x position in slot units; eases toward the slot index.
    pub x: f64,
}

/// Playback state machine for one sorting run.
pub struct SortPlayer {
    algorithm: SortAlgorithm,
    steps: Vec<SortStep>,
    cursor: usize,
    bars: Vec<SortBar>,
    key: Option<usize>,
    compare: Option<(usize, usize)>,
    settled_upto: usize,
    done: bool,
    stopped: bool,
    last_step_time: f64,
}

impl SortPlayer {
    /// Capture the roster and record the full script for `algorithm`.
    pub fn new(algorithm: SortAlgorithm, students: &[Student], now: f64) -> Self {
        let marks: Vec<i64> = students.iter().map(|s| s.marks).collect();
        let bars = students
            .iter()
            .enumerate()
            .map(|(i, s)| SortBar {
                id: s.id,
                name: s.name.clone(),
                roll: s.roll.clone(),
                marks: s.marks,
                x: i as f64,
            })
            .collect();

        Self {
            algorithm,
            steps: steps::script(algorithm, &marks),
            cursor: 0,
            bars,
            key: None,
            compare: None,
            settled_upto: 0,
            done: false,
            stopped: false,
            last_step_time: now,
        }
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// Bars in slot order; `bars()[slot]` is the row displayed at `slot`.
    pub fn bars(&self) -> &[SortBar] {
        &self.bars
    }

    /// Still consuming steps (not finished, not stopped).
    pub fn is_running(&self) -> bool {
        !self.stopped && !self.done && self.cursor < self.steps.len()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Abandon playback; bars freeze where they are.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// Consume the next step once `step_delay` seconds have elapsed since the
    /// previous one. Returns true when a step was applied.
    pub fn advance(&mut self, now: f64, step_delay: f64) -> bool {
        if !self.is_running() || now - self.last_step_time < step_delay {
            return false;
        }
        self.last_step_time = now;

        let step = self.steps[self.cursor];
        self.cursor += 1;

        match step {
            SortStep::Key(i) => {
                self.key = Some(i);
            }
            SortStep::Compare(a, b) => {
                self.compare = Some((a, b));
            }
            SortStep::Swap(a, b) => {
                // x positions travel with the bars, so each one now eases
                // toward its new slot
                self.bars.swap(a, b);
            }
            SortStep::Prefix(k) => {
                self.settled_upto = k;
                self.key = None;
                self.compare = None;
            }
            SortStep::Clear => {
                self.key = None;
                self.compare = None;
            }
            SortStep::Done => {
                self.key = None;
                self.compare = None;
                self.settled_upto = self.bars.len();
                self.done = true;
            }
        }

        true
    }

    /// Ease every bar toward its slot. Returns true while anything still
    /// moves, so the GUI knows to keep repainting after playback ends.
    pub fn animate(&mut self, dt: f64) -> bool {
        let blend = 1.0 - (-dt * EASE_RATE).exp();
        let mut moving = false;

        for (slot, bar) in self.bars.iter_mut().enumerate() {
            let target = slot as f64;
            let delta = target - bar.x;
            if delta.abs() <= SNAP_EPSILON {
                bar.x = target;
                continue;
            }
            bar.x += delta * blend;
            moving = true;
        }

        moving
    }

    /// Highlight for the bar currently occupying `slot`.
    pub fn bar_state(&self, slot: usize) -> BarState {
        if self.done {
            return BarState::Done;
        }
        if let Some((a, b)) = self.compare {
            if slot == a || slot == b {
                return BarState::Compare;
            }
        }
        if self.key == Some(slot) {
            return BarState::Key;
        }
        if slot < self.settled_upto {
            return BarState::Settled;
        }
        BarState::Base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(marks: &[i64]) -> Vec<Student> {
        marks
            .iter()
            .enumerate()
            .map(|(i, m)| Student {
                id: i as i64 + 1,
                name: format!("S{}", i + 1),
                roll: format!("R-{:02}", i + 1),
                marks: *m,
            })
            .collect()
    }

    /// Drive the player to completion with a fixed cadence.
    fn run_to_end(player: &mut SortPlayer) {
        let mut now = 0.0;
        while player.is_running() {
            now += 1.0;
            player.advance(now, 0.5);
        }
    }

    #[test]
    fn test_playback_sorts_the_bars() {
        let students = roster(&[30, 10, 50, 20, 40]);
        for algorithm in [SortAlgorithm::Insertion, SortAlgorithm::Selection] {
            let mut player = SortPlayer::new(algorithm, &students, 0.0);
            run_to_end(&mut player);

            assert!(player.is_done());
            let marks: Vec<i64> = player.bars().iter().map(|b| b.marks).collect();
            assert_eq!(marks, vec![10, 20, 30, 40, 50]);
        }
    }

    #[test]
    fn test_steps_respect_the_delay() {
        let students = roster(&[3, 1, 2]);
        let mut player = SortPlayer::new(SortAlgorithm::Insertion, &students, 0.0);

        assert!(!player.advance(0.05, 0.1), "advanced before the delay");
        assert!(player.advance(0.11, 0.1));
        assert!(!player.advance(0.15, 0.1), "advanced twice within one delay");
    }

    #[test]
    fn test_stop_freezes_playback() {
        let students = roster(&[5, 4, 3, 2, 1]);
        let mut player = SortPlayer::new(SortAlgorithm::Selection, &students, 0.0);

        assert!(player.advance(1.0, 0.1));
        player.stop();
        assert!(!player.is_running());
        assert!(!player.advance(10.0, 0.1));
        assert!(!player.is_done());
    }

    #[test]
    fn test_all_bars_done_after_finish() {
        let students = roster(&[2, 1]);
        let mut player = SortPlayer::new(SortAlgorithm::Insertion, &students, 0.0);
        run_to_end(&mut player);

        for slot in 0..player.bars().len() {
            assert_eq!(player.bar_state(slot), BarState::Done);
        }
    }

    #[test]
    fn test_swapped_bars_glide_home() {
        let students = roster(&[2, 1]);
        let mut player = SortPlayer::new(SortAlgorithm::Insertion, &students, 0.0);
        run_to_end(&mut player);

        // after the swap, bar 0 starts at x=1 and eases to 0
        assert!((player.bars()[0].x - 1.0).abs() < 1e-9);
        for _ in 0..200 {
            player.animate(1.0 / 60.0);
        }
        assert!(!player.animate(1.0 / 60.0), "bars still moving");
        assert_eq!(player.bars()[0].x, 0.0);
        assert_eq!(player.bars()[1].x, 1.0);
    }

    #[test]
    fn test_empty_roster_finishes_immediately() {
        let mut player = SortPlayer::new(SortAlgorithm::Selection, &[], 0.0);
        assert!(player.is_running());
        player.advance(1.0, 0.1);
        assert!(player.is_done());
    }
}
