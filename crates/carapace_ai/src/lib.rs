//! # carapace_ai - State Machines and Perception
//!
//! # Features
//!
//! - Generic finite state machine with enter/exit/tick hooks and terminal states
//! - Field-of-view plus line-of-sight perception with aggro tracking
//!
//! # Example
//!
//! ```ignore
//! use carapace_ai::prelude::*;
//!
//! let mut fsm = StateMachine::new(EnemyState::Idle, &mut core);
//! if let Some(next) = fsm.tick(&mut core, dt) {
//!     fsm.transition_to(next, &mut core)?;
//! }
//! ```

pub mod error;
pub mod perception;
pub mod state_machine;

pub mod prelude {
    pub use crate::error::{Result, TransitionError};
    pub use crate::perception::{Perception, SightTarget, VisionConfig};
    pub use crate::state_machine::{State, StateMachine};
}

pub use prelude::*;
