//! Rendering-command bridge over bgfx.
//!
//! The crate forwards bgfx's immediate-mode frame protocol (init, reset,
//! view setup, submit, frame, debug text, window binding) through the
//! [`native::NativeApi`] seam. With the `native` feature the seam is backed by
//! the linked C shim; without it, [`native::RecordingApi`] stands in.

pub mod bridge;
pub mod core;
pub mod logging;
pub mod native;
pub mod time;
pub mod window;

pub use bridge::{
    BridgeError, ClearFlags, ClearSpec, DebugFlags, RenderingBridge, TextColor, ViewId, text_attr,
};
pub use window::NativeWindow;
