//! Frame timing for the runtime and the debug overlay.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
