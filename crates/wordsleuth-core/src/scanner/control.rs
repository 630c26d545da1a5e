/// Cooperative pause/resume/stop control shared by all scan workers.
///
/// Workers call [`PauseController::wait_until_runnable`] before starting each
/// file. While paused they park on a condition variable instead of polling,
/// and `resume`/`stop` wake every waiter at once.
use parking_lot::{Condvar, Mutex};
use tracing::debug;

/// Control state of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Running,
    Paused,
    /// Terminal. No new file work may start.
    Stopped,
}

#[derive(Debug)]
pub struct PauseController {
    state: Mutex<ControlState>,
    changed: Condvar,
}

impl Default for PauseController {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ControlState::Running),
            changed: Condvar::new(),
        }
    }

    pub fn state(&self) -> ControlState {
        *self.state.lock()
    }

    pub fn is_paused(&self) -> bool {
        self.state() == ControlState::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.state() == ControlState::Stopped
    }

    /// `Running → Paused`. Returns whether the state changed.
    pub fn pause(&self) -> bool {
        self.transition(ControlState::Running, ControlState::Paused)
    }

    /// `Paused → Running`. Returns whether the state changed.
    pub fn resume(&self) -> bool {
        self.transition(ControlState::Paused, ControlState::Running)
    }

    /// Any state → `Stopped`. Wakes every paused worker.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if *state != ControlState::Stopped {
            debug!("Scan control: {:?} -> Stopped", *state);
            *state = ControlState::Stopped;
        }
        self.changed.notify_all();
    }

    /// Block while paused.
    ///
    /// Returns `true` when the caller may start new work, `false` once the
    /// scan has been stopped.
    pub fn wait_until_runnable(&self) -> bool {
        let mut state = self.state.lock();
        while *state == ControlState::Paused {
            self.changed.wait(&mut state);
        }
        *state == ControlState::Running
    }

    fn transition(&self, from: ControlState, to: ControlState) -> bool {
        let mut state = self.state.lock();
        if *state != from {
            return false;
        }
        debug!("Scan control: {from:?} -> {to:?}");
        *state = to;
        self.changed.notify_all();
        true
    }
}
