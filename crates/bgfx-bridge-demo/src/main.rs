use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use bgfx_bridge::core::{App, AppControl, FrameCtx};
use bgfx_bridge::logging::{LoggingConfig, init_logging};
use bgfx_bridge::native::NativeApi;
use bgfx_bridge::window::{Runtime, RuntimeConfig};
use bgfx_bridge::{DebugFlags, TextColor, debug_text, text_attr};

/// Clears the main view and prints a few lines of debug text every frame.
#[derive(Default)]
struct HelloApp {
    show_stats: bool,
}

impl<A: NativeApi> App<A> for HelloApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event, .. } = event
            && event.state == ElementState::Pressed
        {
            match event.physical_key {
                PhysicalKey::Code(KeyCode::Escape) => return AppControl::Exit,
                PhysicalKey::Code(KeyCode::F1) => self.show_stats = !self.show_stats,
                _ => {}
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, A>) -> AppControl {
        let debug = if self.show_stats {
            DebugFlags::STATS
        } else {
            DebugFlags::TEXT
        };
        ctx.bridge.set_debug(debug);

        let title = text_attr(TextColor::White, TextColor::Blue);
        let body = text_attr(TextColor::LightGray, TextColor::Black);
        let (width, height) = ctx.size;
        let frame_index = ctx.time.frame_index;
        let fps = ctx.time.fps;

        ctx.bridge.debug_text_clear();
        let printed = debug_text!(ctx.bridge, 0, 1, title, "bgfx-bridge/00-helloworld")
            .and_then(|()| {
                debug_text!(
                    ctx.bridge,
                    0,
                    2,
                    body,
                    "Backbuffer {width}x{height}, frame {frame_index}"
                )
            })
            .and_then(|()| debug_text!(ctx.bridge, 0, 3, body, "{fps:>6.1} fps (F1: stats)"));
        if let Err(e) = printed {
            log::warn!("debug text skipped: {e}");
        }

        // Touch the main view so it is cleared even with no draw calls.
        ctx.bridge.submit(ctx.main_view);
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "bgfx-bridge hello world".to_string(),
        ..RuntimeConfig::default()
    };

    run(config)
}

#[cfg(feature = "native")]
fn run(config: RuntimeConfig) -> Result<()> {
    use bgfx_bridge::native::FfiApi;

    Runtime::run(config, FfiApi::new(), HelloApp::default())
}

/// Without the native library, replay a few frames against the recorder and
/// log what would have crossed the boundary.
#[cfg(not(feature = "native"))]
fn run(config: RuntimeConfig) -> Result<()> {
    use bgfx_bridge::native::RecordingApi;

    const FRAMES: u64 = 3;

    let recorder = RecordingApi::new();
    let ran = Runtime::run_headless(config, recorder.clone(), HelloApp::default(), FRAMES);

    log::info!("built without `native`; ran {ran} headless frames");
    for call in recorder.calls() {
        log::info!("  {call:?}");
    }
    Ok(())
}
