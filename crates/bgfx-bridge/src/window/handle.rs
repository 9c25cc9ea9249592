use std::ffi::{c_ulong, c_void};
use std::ptr::NonNull;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle};

use crate::bridge::BridgeError;

/// Platform surface handed to the native library.
///
/// The handle stays owned by the windowing toolkit. The bridge reads it once
/// and forwards it; it never retains or frees it. Pointer variants cannot be
/// null.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NativeWindow {
    /// macOS `NSView*`.
    Cocoa { ns_view: NonNull<c_void> },
    /// Windows `HWND`.
    Win32 { hwnd: NonNull<c_void> },
    /// X11 window id plus the `Display*` it lives on, if known.
    Xlib {
        display: Option<NonNull<c_void>>,
        window: c_ulong,
    },
}

impl NativeWindow {
    /// Converts toolkit-neutral raw handles into a bindable window.
    pub fn from_handles(
        window: RawWindowHandle,
        display: RawDisplayHandle,
    ) -> Result<Self, BridgeError> {
        match window {
            RawWindowHandle::AppKit(h) => Ok(Self::Cocoa { ns_view: h.ns_view }),
            RawWindowHandle::Win32(h) => {
                let hwnd = NonNull::new(h.hwnd.get() as *mut c_void)
                    .ok_or(raw_window_handle::HandleError::Unavailable)?;
                Ok(Self::Win32 { hwnd })
            }
            RawWindowHandle::Xlib(h) => {
                let display = match display {
                    RawDisplayHandle::Xlib(d) => d.display,
                    _ => None,
                };
                Ok(Self::Xlib {
                    display,
                    window: h.window,
                })
            }
            other => Err(BridgeError::UnsupportedWindow(platform_name(&other))),
        }
    }

    /// Reads the raw handles of a live window.
    pub fn from_window<W>(window: &W) -> Result<Self, BridgeError>
    where
        W: HasWindowHandle + HasDisplayHandle + ?Sized,
    {
        let raw_window = window.window_handle()?.as_raw();
        let raw_display = window.display_handle()?.as_raw();
        Self::from_handles(raw_window, raw_display)
    }

    pub fn platform(&self) -> &'static str {
        match self {
            Self::Cocoa { .. } => "cocoa",
            Self::Win32 { .. } => "win32",
            Self::Xlib { .. } => "xlib",
        }
    }
}

fn platform_name(handle: &RawWindowHandle) -> &'static str {
    match handle {
        RawWindowHandle::Wayland(_) => "wayland",
        RawWindowHandle::Xcb(_) => "xcb",
        RawWindowHandle::UiKit(_) => "uikit",
        RawWindowHandle::AndroidNdk(_) => "android",
        RawWindowHandle::Web(_) => "web",
        RawWindowHandle::Orbital(_) => "orbital",
        _ => "unknown",
    }
}
