//! Output-side control: the relay state machine and the indicator fader.

pub mod fader;
pub mod relay;
