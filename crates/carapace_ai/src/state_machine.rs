//! Finite State Machine (FSM) implementation

use crate::error::{Result, TransitionError};
use std::fmt::Debug;

/// A state in the state machine.
///
/// Hooks receive the owning actor's context `C`. `tick` may ask for a
/// transition by returning the next state; the machine never applies it on
/// its own, the owner decides and calls
/// [`transition_to`](StateMachine::transition_to).
pub trait State<C>: Clone + PartialEq + Debug {
    /// Called when entering this state
    fn on_enter(&self, _ctx: &mut C) {}
    /// Called when exiting this state
    fn on_exit(&self, _ctx: &mut C) {}
    /// Called every tick while in this state
    fn tick(&self, _ctx: &mut C, _delta_time: f32) -> Option<Self> {
        None
    }
    /// Terminal states can never be left
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Finite State Machine
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    /// Current state
    current: S,
    /// Previous state
    previous: Option<S>,
    /// Seconds spent in the current state
    time_in_state: f32,
}

impl<S> StateMachine<S> {
    /// Create a machine and enter `initial`
    pub fn new<C>(initial: S, ctx: &mut C) -> Self
    where
        S: State<C>,
    {
        initial.on_enter(ctx);
        log::trace!("FSM starts in {:?}", initial);
        Self {
            current: initial,
            previous: None,
            time_in_state: 0.0,
        }
    }

    /// Get current state
    pub fn current(&self) -> &S {
        &self.current
    }

    /// Get previous state
    pub fn previous(&self) -> Option<&S> {
        self.previous.as_ref()
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Leave the current state and enter `next`.
    ///
    /// Fails, calling no hooks, when the current state is terminal.
    pub fn transition_to<C>(&mut self, next: S, ctx: &mut C) -> Result<()>
    where
        S: State<C>,
    {
        if self.current.is_terminal() {
            return Err(TransitionError::Terminal(format!("{:?}", self.current)));
        }
        log::trace!("FSM {:?} -> {:?}", self.current, next);
        self.current.on_exit(ctx);
        let previous = std::mem::replace(&mut self.current, next);
        self.previous = Some(previous);
        self.time_in_state = 0.0;
        self.current.on_enter(ctx);
        Ok(())
    }

    /// Tick the current state; returns the transition it asks for, if any
    pub fn tick<C>(&mut self, ctx: &mut C, delta_time: f32) -> Option<S>
    where
        S: State<C>,
    {
        self.time_in_state += delta_time;
        self.current.tick(ctx, delta_time)
    }

    /// Check if in a specific state
    pub fn is_in(&self, state: &S) -> bool
    where
        S: PartialEq,
    {
        &self.current == state
    }

    pub fn is_terminal<C>(&self) -> bool
    where
        S: State<C>,
    {
        self.current.is_terminal()
    }
}
