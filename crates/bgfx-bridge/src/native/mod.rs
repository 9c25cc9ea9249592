//! The native boundary.
//!
//! `NativeApi` is the only seam between the bridge and bgfx. Every method maps
//! to exactly one C entry point of the shim in `include/bridge.h` and takes
//! arguments at that entry point's ABI width, so all narrowing happens in the
//! bridge before a call reaches this trait.
//!
//! Implementations:
//! - `FfiApi` (feature `native`): calls into the linked shim
//! - `RecordingApi`: records calls in memory; used by tests and headless runs

#[cfg(feature = "native")]
mod ffi;
mod recording;

use std::ffi::CStr;

use crate::window::NativeWindow;

#[cfg(feature = "native")]
pub use ffi::FfiApi;
pub use recording::{NativeCall, RecordingApi};

/// One method per native entry point.
///
/// Implementations must forward synchronously and must not validate or
/// reorder; the caller owns sequencing.
pub trait NativeApi {
    fn init(&mut self);
    fn shutdown(&mut self);
    fn reset(&mut self, width: u32, height: u32);
    fn frame(&mut self);
    fn submit(&mut self, view: u8);

    fn set_debug(&mut self, debug: u32);
    fn dbg_text_clear(&mut self);

    /// `text` is NUL-terminated and never empty.
    fn dbg_text_print(&mut self, x: u32, y: u32, attr: u8, text: &CStr);

    fn set_view_rect(&mut self, view: u8, x: u16, y: u16, width: u16, height: u16);
    fn set_view_clear(&mut self, view: u8, flags: u8, rgba: u32, depth: f32, stencil: u8);

    /// Selects the OS surface to render into.
    fn set_window(&mut self, window: NativeWindow);
}
