//! Rendering bridge facade.
//!
//! `RenderingBridge` forwards the frame/view/submit protocol into a
//! [`NativeApi`]. It converts argument widths and owns the lifecycle of the
//! native context:
//! - construction calls `init` exactly once
//! - `shutdown` consumes the bridge (drop shuts down if it was not called)
//!
//! Everything else is passed through untouched. Out-of-range views, zero sizes
//! and calls made in the wrong order are left to the native library.

mod debug_text;
mod error;
mod types;

use std::fmt;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use crate::native::NativeApi;
use crate::window::NativeWindow;

pub use debug_text::{TextColor, text_attr};
pub use error::BridgeError;
pub use types::{ClearFlags, ClearSpec, DebugFlags, ViewId};

/// Owner of the process-wide native rendering context.
///
/// All methods must be called from the thread that created the bridge; the
/// native API implementation decides whether the type can move at all.
pub struct RenderingBridge<A: NativeApi> {
    api: A,
    live: bool,
}

impl<A: NativeApi> RenderingBridge<A> {
    /// Initializes the native context.
    pub fn init(mut api: A) -> Self {
        log::debug!("bgfx init");
        api.init();
        Self { api, live: true }
    }

    /// Binds `window` and then initializes the native context.
    ///
    /// bgfx reads platform data during init, so this is the usual entry point
    /// when rendering into a window.
    pub fn with_window(mut api: A, window: NativeWindow) -> Self {
        log::debug!("binding {} window before init", window.platform());
        api.set_window(window);
        Self::init(api)
    }

    /// Tears the native context down. No call can follow.
    pub fn shutdown(mut self) {
        self.shutdown_once();
    }

    /// Resizes the backbuffer. Call after the surface changed size.
    pub fn reset(&mut self, width: u32, height: u32) {
        log::debug!("bgfx reset {width}x{height}");
        self.api.reset(width, height);
    }

    /// Flushes everything submitted since the previous frame and presents.
    pub fn frame(&mut self) {
        log::trace!("bgfx frame");
        self.api.frame();
    }

    pub fn submit(&mut self, view: ViewId) {
        self.api.submit(view.raw());
    }

    /// Sets the debug mode for all following frames.
    pub fn set_debug(&mut self, flags: DebugFlags) {
        self.api.set_debug(flags.bits());
    }

    pub fn debug_text_clear(&mut self) {
        self.api.dbg_text_clear();
    }

    /// Prints `text` into the debug overlay grid at column `x`, row `y`.
    pub fn debug_text_print(
        &mut self,
        x: u32,
        y: u32,
        attr: u8,
        text: &str,
    ) -> Result<(), BridgeError> {
        self.debug_text_fmt(x, y, attr, format_args!("{text}"))
    }

    /// Formatted variant of [`debug_text_print`](Self::debug_text_print).
    ///
    /// Usually reached through the [`debug_text!`](crate::debug_text) macro.
    pub fn debug_text_fmt(
        &mut self,
        x: u32,
        y: u32,
        attr: u8,
        args: fmt::Arguments<'_>,
    ) -> Result<(), BridgeError> {
        let text = debug_text::to_native_text(args).inspect_err(|e| {
            log::warn!("debug text at ({x}, {y}) dropped: {e}");
        })?;
        self.api.dbg_text_print(x, y, attr, &text);
        Ok(())
    }

    /// Sets the viewport of `view`.
    ///
    /// Each coordinate keeps its low 16 bits, matching the native `uint16_t`
    /// parameters (70000 becomes 4464).
    pub fn set_view_rect(&mut self, view: ViewId, x: u32, y: u32, width: u32, height: u32) {
        self.api
            .set_view_rect(view.raw(), x as u16, y as u16, width as u16, height as u16);
    }

    pub fn set_view_clear(&mut self, view: ViewId, clear: ClearSpec) {
        self.api.set_view_clear(
            view.raw(),
            clear.flags.bits(),
            clear.rgba,
            clear.depth,
            clear.stencil,
        );
    }

    /// Tells the native library which OS surface to render into.
    pub fn set_native_window(&mut self, window: NativeWindow) {
        log::debug!("binding {} window", window.platform());
        self.api.set_window(window);
    }

    /// Reads the raw handle of a toolkit window and binds it.
    pub fn bind_window<W>(&mut self, window: &W) -> Result<NativeWindow, BridgeError>
    where
        W: HasWindowHandle + HasDisplayHandle + ?Sized,
    {
        let native = NativeWindow::from_window(window)?;
        self.set_native_window(native);
        Ok(native)
    }

    /// The underlying native API.
    pub fn api(&self) -> &A {
        &self.api
    }

    fn shutdown_once(&mut self) {
        if self.live {
            log::debug!("bgfx shutdown");
            self.api.shutdown();
            self.live = false;
        }
    }
}

impl<A: NativeApi> Drop for RenderingBridge<A> {
    fn drop(&mut self) {
        self.shutdown_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{NativeCall, RecordingApi};
    use std::ffi::c_void;
    use std::ptr::NonNull;

    fn bridge() -> (RenderingBridge<RecordingApi>, RecordingApi) {
        let probe = RecordingApi::new();
        let bridge = RenderingBridge::init(probe.clone());
        probe.clear();
        (bridge, probe)
    }

    #[test]
    fn init_is_the_first_call() {
        let probe = RecordingApi::new();
        let _bridge = RenderingBridge::init(probe.clone());
        assert_eq!(probe.calls(), vec![NativeCall::Init]);
    }

    #[test]
    fn with_window_binds_before_init() {
        let probe = RecordingApi::new();
        let window = NativeWindow::Cocoa {
            ns_view: NonNull::new(0x40 as *mut c_void).unwrap(),
        };
        let _bridge = RenderingBridge::with_window(probe.clone(), window);
        assert_eq!(probe.calls(), vec![NativeCall::SetWindow(window), NativeCall::Init]);
    }

    #[test]
    fn native_window_is_forwarded_on_live_bridge() {
        let (mut bridge, probe) = bridge();
        let window = NativeWindow::Xlib {
            display: NonNull::new(0x3000 as *mut c_void),
            window: 77,
        };
        bridge.set_native_window(window);
        assert_eq!(probe.calls(), vec![NativeCall::SetWindow(window)]);
    }

    struct FakeXlibWindow {
        display: NonNull<c_void>,
        window: std::ffi::c_ulong,
    }

    impl HasWindowHandle for FakeXlibWindow {
        fn window_handle(
            &self,
        ) -> Result<raw_window_handle::WindowHandle<'_>, raw_window_handle::HandleError> {
            let raw = raw_window_handle::RawWindowHandle::Xlib(
                raw_window_handle::XlibWindowHandle::new(self.window),
            );
            // SAFETY: the handle is only read back as plain values.
            Ok(unsafe { raw_window_handle::WindowHandle::borrow_raw(raw) })
        }
    }

    impl HasDisplayHandle for FakeXlibWindow {
        fn display_handle(
            &self,
        ) -> Result<raw_window_handle::DisplayHandle<'_>, raw_window_handle::HandleError> {
            let raw = raw_window_handle::RawDisplayHandle::Xlib(
                raw_window_handle::XlibDisplayHandle::new(Some(self.display), 0),
            );
            // SAFETY: as above.
            Ok(unsafe { raw_window_handle::DisplayHandle::borrow_raw(raw) })
        }
    }

    #[test]
    fn bind_window_reads_and_forwards_toolkit_handles() {
        let (mut bridge, probe) = bridge();
        let display = NonNull::new(0x5000 as *mut c_void).unwrap();
        let toolkit = FakeXlibWindow {
            display,
            window: 0x2a,
        };

        let bound = bridge.bind_window(&toolkit).unwrap();

        let expected = NativeWindow::Xlib {
            display: Some(display),
            window: 0x2a,
        };
        assert_eq!(bound, expected);
        assert_eq!(probe.calls(), vec![NativeCall::SetWindow(expected)]);
    }

    #[test]
    fn shutdown_is_forwarded_once() {
        let (bridge, probe) = bridge();
        bridge.shutdown();
        assert_eq!(probe.calls(), vec![NativeCall::Shutdown]);
    }

    #[test]
    fn drop_shuts_down() {
        let (bridge, probe) = bridge();
        drop(bridge);
        assert_eq!(probe.calls(), vec![NativeCall::Shutdown]);
    }

    #[test]
    fn view_rect_forwards_each_view_unchanged() {
        let (mut bridge, probe) = bridge();
        for v in 0..=u8::MAX {
            bridge.set_view_rect(ViewId(v), 1, 2, 640, 480);
        }

        let calls = probe.calls();
        assert_eq!(calls.len(), 256);
        for (v, call) in calls.into_iter().enumerate() {
            assert_eq!(
                call,
                NativeCall::SetViewRect {
                    view: v as u8,
                    x: 1,
                    y: 2,
                    width: 640,
                    height: 480,
                }
            );
        }
    }

    #[test]
    fn view_rect_truncates_to_sixteen_bits() {
        let (mut bridge, probe) = bridge();
        bridge.set_view_rect(ViewId::MAIN, 65536, 65535, 70000, 131073);

        assert_eq!(
            probe.calls(),
            vec![NativeCall::SetViewRect {
                view: 0,
                x: 0,
                y: 65535,
                width: 4464,
                height: 1,
            }]
        );
    }

    #[test]
    fn debug_flags_are_combined_into_one_call() {
        let (mut bridge, probe) = bridge();
        bridge.set_debug(DebugFlags::WIREFRAME | DebugFlags::STATS);
        assert_eq!(probe.calls(), vec![NativeCall::SetDebug { debug: 5 }]);
    }

    #[test]
    fn formatted_debug_text_is_nul_terminated() {
        let (mut bridge, probe) = bridge();
        crate::debug_text!(bridge, 3, 4, 0x6f, "hp={}", 42).unwrap();

        assert_eq!(
            probe.calls(),
            vec![NativeCall::DbgTextPrint {
                x: 3,
                y: 4,
                attr: 0x6f,
                text: b"hp=42\0".to_vec(),
            }]
        );
    }

    #[test]
    fn plain_debug_text_is_not_reformatted() {
        let (mut bridge, probe) = bridge();
        bridge.debug_text_print(0, 0, 0x0f, "100% {braces}").unwrap();

        let Some(NativeCall::DbgTextPrint { text, .. }) = probe.calls().pop() else {
            panic!("expected a debug text call");
        };
        assert_eq!(text, b"100% {braces}\0");
    }

    #[test]
    fn debug_text_with_nul_forwards_nothing() {
        let (mut bridge, probe) = bridge();
        let err = bridge.debug_text_print(0, 0, 0x0f, "a\0b").unwrap_err();

        assert!(matches!(err, BridgeError::InteriorNul { position: 1 }));
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn frame_without_submit_just_advances() {
        let (mut bridge, probe) = bridge();
        bridge.frame();
        bridge.frame();

        assert_eq!(probe.frames(), 2);
        assert_eq!(probe.calls(), vec![NativeCall::Frame, NativeCall::Frame]);
    }

    #[test]
    fn zero_reset_is_forwarded_literally() {
        let (mut bridge, probe) = bridge();
        bridge.reset(0, 0);
        assert_eq!(probe.calls(), vec![NativeCall::Reset { width: 0, height: 0 }]);
    }

    #[test]
    fn view_clear_unpacks_the_spec() {
        let (mut bridge, probe) = bridge();
        let spec = ClearSpec::default().with_flags(ClearFlags::all()).with_stencil(9);
        bridge.set_view_clear(ViewId(2), spec);

        assert_eq!(
            probe.calls(),
            vec![NativeCall::SetViewClear {
                view: 2,
                flags: 0x7,
                rgba: 0x303030ff,
                depth: 1.0,
                stencil: 9,
            }]
        );
    }

    #[test]
    fn frame_sequence_keeps_call_order() {
        let (mut bridge, probe) = bridge();
        bridge.debug_text_clear();
        bridge.submit(ViewId(1));
        bridge.submit(ViewId::MAIN);
        bridge.frame();

        assert_eq!(
            probe.calls(),
            vec![
                NativeCall::DbgTextClear,
                NativeCall::Submit { view: 1 },
                NativeCall::Submit { view: 0 },
                NativeCall::Frame,
            ]
        );
    }
}
