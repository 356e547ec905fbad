//! Chat lifecycle state machine
//!
//! Pure transitions between idle, loading, streaming and error. The widget
//! feeds events in and stores whatever state comes out.

pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use event::ChatEvent;
pub use state::ChatState;
pub use transition::{transition, TransitionError};
