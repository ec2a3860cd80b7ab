//! Dead: terminal state. Nothing inside the AI requests it; hosts force it
//! through `Controller::set_state`.

use crate::collaborator::Marker;
use crate::state::{Lifecycle, Senses, Transition};

#[derive(Debug)]
pub struct DeadState {
    marker: Marker,
    pub(crate) lifecycle: Lifecycle,
}

impl DeadState {
    pub fn new(marker: Marker) -> Self {
        Self {
            marker,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Marker applied on death
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Start/stop bookkeeping
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub(crate) fn start(&mut self) {
        self.lifecycle.enter();
    }

    pub(crate) fn stop(&mut self) {
        self.lifecycle.exit();
    }

    pub(crate) fn update(&mut self, _senses: &Senses<'_>) -> Option<Transition> {
        None
    }
}
