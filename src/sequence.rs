//! Presentation phases around a countdown target.
//!
//! ```text
//!     Waiting ──(remaining ≤ trigger)──▶ CountdownMusic ──(remaining = 0)──▶ Blackout
//!                                                                              │
//!                  Done ◀──(all bells rung)── Bells ◀──(blackout wait over)────┘
//! ```
//!
//! [`Timeline::advance`] is a pure transition function. The caller owns the
//! current [`Phase`], feeds it a [`Clock`] on every tick, and issues side
//! effects (music, blackout, bells, finale) when the returned phase differs
//! from the one it passed in.
//!
//! ```
//! use coverwarp::sequence::{Clock, Phase, Timeline};
//!
//! let timeline = Timeline::default();
//! let phase = timeline.advance(Phase::Waiting, Clock::remaining(200));
//! assert_eq!(phase, Phase::CountdownMusic);
//! let phase = timeline.advance(phase, Clock::remaining(0));
//! assert_eq!(phase, Phase::Blackout);
//! ```

/// Where the presentation is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Ambient scene, countdown visible, background music.
    #[default]
    Waiting,
    /// Final stretch before the target, countdown music playing.
    CountdownMusic,
    /// Target reached; panels go dark.
    Blackout,
    /// One bell per interval, each led by a firework.
    Bells,
    /// Finale. Terminal.
    Done,
}

impl Phase {
    /// Whether the countdown display is still meaningful.
    pub fn shows_countdown(self) -> bool {
        matches!(self, Self::Waiting | Self::CountdownMusic)
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}

/// Inputs to a transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    /// Whole seconds left until the target (see
    /// [`Countdown`](crate::countdown::Countdown)). Drives the clock-driven
    /// phases.
    pub remaining_secs: u64,
    /// Milliseconds since the current phase was entered. Drives the
    /// timer-driven phases.
    pub in_phase_ms: u64,
}

impl Clock {
    /// A clock reading with only the countdown set.
    pub fn remaining(secs: u64) -> Self {
        Self {
            remaining_secs: secs,
            in_phase_ms: 0,
        }
    }

    /// A clock reading with only the in-phase time set.
    pub fn in_phase(ms: u64) -> Self {
        Self {
            remaining_secs: 0,
            in_phase_ms: ms,
        }
    }
}

/// Timing of the sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    /// Countdown music starts once at most this many seconds remain.
    pub countdown_trigger_secs: u64,
    /// How long the blackout lasts before the first bell.
    pub blackout_ms: u64,
    /// Number of bells.
    pub bell_count: u32,
    /// Time between consecutive bells.
    pub bell_interval_ms: u64,
    /// Delay from entering `Done` to the finale.
    pub finale_delay_ms: u64,
    /// How far a bell's firework launches ahead of the bell itself, so the
    /// burst lands on the strike.
    pub firework_lead_ms: u64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            countdown_trigger_secs: 218,
            blackout_ms: 5000,
            bell_count: 12,
            bell_interval_ms: 5000,
            finale_delay_ms: 2000,
            firework_lead_ms: 650,
        }
    }
}

impl Timeline {
    /// Set the countdown-music trigger.
    pub fn countdown_trigger_secs(mut self, secs: u64) -> Self {
        self.countdown_trigger_secs = secs;
        self
    }

    /// Set the number of bells and the interval between them.
    pub fn bells(mut self, count: u32, interval_ms: u64) -> Self {
        self.bell_count = count;
        self.bell_interval_ms = interval_ms;
        self
    }

    /// The phase after `phase` given `clock`. At most one step per call.
    pub fn advance(&self, phase: Phase, clock: Clock) -> Phase {
        let next = match phase {
            Phase::Waiting
                if clock.remaining_secs > 0
                    && clock.remaining_secs <= self.countdown_trigger_secs =>
            {
                Phase::CountdownMusic
            }
            Phase::CountdownMusic if clock.remaining_secs == 0 => Phase::Blackout,
            Phase::Blackout if clock.in_phase_ms >= self.blackout_ms => Phase::Bells,
            Phase::Bells if clock.in_phase_ms >= self.bells_duration_ms() => Phase::Done,
            other => other,
        };
        if next != phase {
            debug!(from = ?phase, to = ?next, "phase transition");
        }
        next
    }

    /// Length of the bells phase.
    pub fn bells_duration_ms(&self) -> u64 {
        u64::from(self.bell_count).saturating_mul(self.bell_interval_ms)
    }

    /// Cue for bell `number` (1-based), or `None` past the last bell.
    pub fn bell_cue(&self, number: u32) -> Option<BellCue> {
        if number == 0 || number > self.bell_count {
            return None;
        }
        let launch_at_ms = u64::from(number - 1).saturating_mul(self.bell_interval_ms);
        Some(BellCue {
            number,
            launch_at_ms,
            strike_at_ms: launch_at_ms.saturating_add(self.firework_lead_ms),
        })
    }

    /// Every bell in order.
    pub fn bell_cues(&self) -> impl Iterator<Item = BellCue> + '_ {
        (1..=self.bell_count).filter_map(|n| self.bell_cue(n))
    }

    /// The most recent bell whose firework has launched `in_phase_ms` into
    /// the bells phase.
    pub fn bell_at(&self, in_phase_ms: u64) -> Option<BellCue> {
        if self.bell_count == 0 || in_phase_ms >= self.bells_duration_ms() {
            return None;
        }
        // A zero interval makes the duration zero, so the division is safe.
        let index = (in_phase_ms / self.bell_interval_ms).min(u64::from(self.bell_count - 1));
        self.bell_cue(index as u32 + 1)
    }

    /// Time into `Done` at which the finale is shown.
    pub fn finale_at_ms(&self) -> u64 {
        self.finale_delay_ms
    }
}

/// When a bell happens, relative to the start of the bells phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BellCue {
    /// 1-based bell number, also the number shown on the panels.
    pub number: u32,
    /// Firework launch.
    pub launch_at_ms: u64,
    /// Bell sound, number and word.
    pub strike_at_ms: u64,
}

impl BellCue {
    /// The word revealed with this bell from a caller-supplied list, or
    /// `""` when the list runs out or the bell number is 0.
    pub fn word<'a>(&self, words: &[&'a str]) -> &'a str {
        (self.number as usize)
            .checked_sub(1)
            .and_then(|i| words.get(i))
            .copied()
            .unwrap_or("")
    }
}
