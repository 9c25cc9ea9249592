use std::ffi::{CStr, c_char, c_float, c_ulong, c_void};
use std::marker::PhantomData;
use std::ptr;

use super::NativeApi;
use crate::window::NativeWindow;

// Declarations mirror include/bridge.h.
unsafe extern "C" {
    fn bgfx_init();
    fn bgfx_shutdown();
    fn bgfx_reset(width: u32, height: u32);
    fn bgfx_frame();
    fn bgfx_submit(view: u8);

    fn bgfx_setDebug(debug: u32);
    fn bgfx_dbgTextClear();
    fn bgfx_dbgTextPrint(x: u32, y: u32, attr: u8, text: *const c_char);

    fn bgfx_setViewRect(view: u8, x: u16, y: u16, width: u16, height: u16);
    fn bgfx_setViewClear(view: u8, flags: u8, rgba: u32, depth: c_float, stencil: u8);

    fn bgfx_setCocoaWindow(ns_view: *mut c_void);
    fn bgfx_setWin32Window(hwnd: *mut c_void);
    fn bgfx_setXlibWindow(display: *mut c_void, window: c_ulong);
}

/// Forwards into the linked bgfx shim.
///
/// bgfx keeps one process-wide context that must be driven from a single
/// thread, so this type is neither `Send` nor `Sync`.
#[derive(Debug, Default)]
pub struct FfiApi {
    _render_thread: PhantomData<*const ()>,
}

impl FfiApi {
    pub fn new() -> Self {
        Self::default()
    }
}

// SAFETY (all calls below): the shim functions take plain values, and the only
// pointers passed are a live `CStr` borrowed for the duration of the call and
// window handles owned by the toolkit. Sequencing errors are bgfx's to report.
impl NativeApi for FfiApi {
    fn init(&mut self) {
        unsafe { bgfx_init() }
    }

    fn shutdown(&mut self) {
        unsafe { bgfx_shutdown() }
    }

    fn reset(&mut self, width: u32, height: u32) {
        unsafe { bgfx_reset(width, height) }
    }

    fn frame(&mut self) {
        unsafe { bgfx_frame() }
    }

    fn submit(&mut self, view: u8) {
        unsafe { bgfx_submit(view) }
    }

    fn set_debug(&mut self, debug: u32) {
        unsafe { bgfx_setDebug(debug) }
    }

    fn dbg_text_clear(&mut self) {
        unsafe { bgfx_dbgTextClear() }
    }

    fn dbg_text_print(&mut self, x: u32, y: u32, attr: u8, text: &CStr) {
        unsafe { bgfx_dbgTextPrint(x, y, attr, text.as_ptr()) }
    }

    fn set_view_rect(&mut self, view: u8, x: u16, y: u16, width: u16, height: u16) {
        unsafe { bgfx_setViewRect(view, x, y, width, height) }
    }

    fn set_view_clear(&mut self, view: u8, flags: u8, rgba: u32, depth: f32, stencil: u8) {
        unsafe { bgfx_setViewClear(view, flags, rgba, depth, stencil) }
    }

    fn set_window(&mut self, window: NativeWindow) {
        match window {
            NativeWindow::Cocoa { ns_view } => unsafe { bgfx_setCocoaWindow(ns_view.as_ptr()) },
            NativeWindow::Win32 { hwnd } => unsafe { bgfx_setWin32Window(hwnd.as_ptr()) },
            NativeWindow::Xlib { display, window } => {
                let display = display.map_or(ptr::null_mut(), |d| d.as_ptr());
                unsafe { bgfx_setXlibWindow(display, window) }
            }
        }
    }
}
