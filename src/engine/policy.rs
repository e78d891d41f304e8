// src/engine/policy.rs

//! Where the driving loop gets its actions from.

use std::collections::VecDeque;

use crate::sim::{Action, Simulation};

/// Supplies the action for the next step.
///
/// Returning `None` stops the driving loop before the episode is done.
pub trait ActionSource: Send {
    fn next_action(&mut self, sim: &Simulation) -> Option<Action>;
}

/// Always submit `Action::Index(n)`.
///
/// With `n = 0` this is the canonical order: the lowest `(job, index)`
/// eligible operation every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedIndex(pub usize);

impl ActionSource for FixedIndex {
    fn next_action(&mut self, _sim: &Simulation) -> Option<Action> {
        Some(Action::Index(self.0))
    }
}

/// Submit a fixed sequence of actions, then stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scripted {
    actions: VecDeque<Action>,
}

impl Scripted {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }
}

impl ActionSource for Scripted {
    fn next_action(&mut self, _sim: &Simulation) -> Option<Action> {
        self.actions.pop_front()
    }
}
