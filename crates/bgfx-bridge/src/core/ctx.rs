use crate::bridge::{RenderingBridge, ViewId};
use crate::native::NativeApi;
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a, A: NativeApi> {
    pub bridge: &'a mut RenderingBridge<A>,
    /// View the runtime keeps sized to the backbuffer.
    pub main_view: ViewId,
    /// Backbuffer size in physical pixels.
    pub size: (u32, u32),
    pub time: FrameTime,
}
