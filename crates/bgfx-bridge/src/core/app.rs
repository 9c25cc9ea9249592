use winit::event::WindowEvent;

use super::ctx::FrameCtx;
use crate::bridge::RenderingBridge;
use crate::native::NativeApi;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application driven by [`Runtime`](crate::window::Runtime).
pub trait App<A: NativeApi> {
    /// Called once after the bridge is initialized and the main view configured.
    fn on_init(&mut self, bridge: &mut RenderingBridge<A>) {
        let _ = bridge;
    }

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Records this frame's work. The runtime calls `frame()` afterwards.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, A>) -> AppControl;
}
