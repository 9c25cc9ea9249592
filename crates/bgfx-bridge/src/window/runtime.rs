use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
#[cfg(target_os = "linux")]
use winit::platform::x11::EventLoopBuilderExtX11;
use winit::window::{Window, WindowId};

use super::NativeWindow;
use crate::bridge::{ClearSpec, DebugFlags, RenderingBridge, ViewId};
use crate::core::{App, AppControl, FrameCtx};
use crate::native::NativeApi;
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// View kept sized to the backbuffer.
    pub main_view: ViewId,
    pub debug: DebugFlags,
    pub clear: ClearSpec,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "bgfx-bridge".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            main_view: ViewId::MAIN,
            debug: DebugFlags::TEXT,
            clear: ClearSpec::default(),
        }
    }
}

impl RuntimeConfig {
    fn headless_size(&self) -> (u32, u32) {
        (
            self.initial_size.width.round().max(0.0) as u32,
            self.initial_size.height.round().max(0.0) as u32,
        )
    }
}

/// Entry point for the render loop.
pub struct Runtime;

impl Runtime {
    /// Opens one window, binds it and drives frames until the window closes or
    /// the app asks to exit.
    pub fn run<A, P>(config: RuntimeConfig, api: A, app: P) -> Result<()>
    where
        A: NativeApi,
        P: App<A>,
    {
        let event_loop = event_loop()?;
        let mut state = RuntimeState::new(config, api, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Runs the same init/frame/shutdown sequence without a window.
    ///
    /// No window is bound; the backbuffer uses `config.initial_size` as
    /// physical pixels. Returns the number of frames run, which is lower than
    /// `frames` if the app exits early.
    pub fn run_headless<A, P>(config: RuntimeConfig, api: A, mut app: P, frames: u64) -> u64
    where
        A: NativeApi,
        P: App<A>,
    {
        let size = config.headless_size();
        let mut bridge = RenderingBridge::init(api);
        configure(&mut bridge, &config, size);
        app.on_init(&mut bridge);

        let mut clock = FrameClock::new();
        let mut ran = 0;
        while ran < frames {
            let control = drive_frame(&mut bridge, &mut app, config.main_view, size, clock.tick());
            ran += 1;
            if control == AppControl::Exit {
                break;
            }
        }

        bridge.shutdown();
        log::debug!("headless run finished after {ran} frames");
        ran
    }
}

/// Builds the event loop on a backend the shim can bind.
///
/// On Linux the shim only knows Xlib, so Wayland sessions go through XWayland.
fn event_loop() -> Result<EventLoop<()>> {
    #[cfg_attr(not(target_os = "linux"), allow(unused_mut))]
    let mut builder = EventLoop::builder();

    #[cfg(target_os = "linux")]
    builder.with_x11();

    builder.build().context("failed to create winit EventLoop")
}

fn configure<A: NativeApi>(
    bridge: &mut RenderingBridge<A>,
    config: &RuntimeConfig,
    (width, height): (u32, u32),
) {
    bridge.reset(width, height);
    bridge.set_view_rect(config.main_view, 0, 0, width, height);
    bridge.set_view_clear(config.main_view, config.clear);
    bridge.set_debug(config.debug);
}

fn drive_frame<A, P>(
    bridge: &mut RenderingBridge<A>,
    app: &mut P,
    main_view: ViewId,
    size: (u32, u32),
    time: FrameTime,
) -> AppControl
where
    A: NativeApi,
    P: App<A>,
{
    let control = {
        let mut ctx = FrameCtx {
            bridge: &mut *bridge,
            main_view,
            size,
            time,
        };
        app.on_frame(&mut ctx)
    };

    bridge.frame();
    control
}

struct RuntimeState<A, P>
where
    A: NativeApi,
    P: App<A>,
{
    config: RuntimeConfig,
    /// Consumed when the window comes up.
    api: Option<A>,
    app: P,
    clock: FrameClock,

    // Declared before `window`: the native context must go away while the
    // surface it renders into still exists.
    bridge: Option<RenderingBridge<A>>,
    window: Option<Window>,
    size: (u32, u32),

    error: Option<anyhow::Error>,
}

impl<A, P> RuntimeState<A, P>
where
    A: NativeApi,
    P: App<A>,
{
    fn new(config: RuntimeConfig, api: A, app: P) -> Self {
        Self {
            config,
            api: Some(api),
            app,
            clock: FrameClock::new(),
            bridge: None,
            window: None,
            size: (0, 0),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let api = self.api.take().context("runtime was already started")?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let native =
            NativeWindow::from_window(&window).context("failed to read native window handle")?;

        let PhysicalSize { width, height } = window.inner_size();
        let mut bridge = RenderingBridge::with_window(api, native);
        configure(&mut bridge, &self.config, (width, height));
        self.app.on_init(&mut bridge);

        window.request_redraw();

        self.size = (width, height);
        self.bridge = Some(bridge);
        self.window = Some(window);
        Ok(())
    }

    fn stop(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(bridge) = self.bridge.take() {
            bridge.shutdown();
        }
        self.window = None;
        event_loop.exit();
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(bridge) = self.bridge.as_mut() else {
            return;
        };

        self.size = (new_size.width, new_size.height);
        bridge.reset(new_size.width, new_size.height);
        bridge.set_view_rect(self.config.main_view, 0, 0, new_size.width, new_size.height);
    }
}

impl<A, P> ApplicationHandler for RuntimeState<A, P>
where
    A: NativeApi,
    P: App<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.bridge.is_some() || self.error.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            log::error!("failed to start runtime: {e:#}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the native library paces presentation.
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.app.on_window_event(&event) == AppControl::Exit {
            self.stop(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.stop(event_loop),

            WindowEvent::Resized(new_size) => {
                self.resize(new_size);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(bridge) = self.bridge.as_mut() else {
                    return;
                };

                let time = self.clock.tick();
                let control =
                    drive_frame(bridge, &mut self.app, self.config.main_view, self.size, time);

                if control == AppControl::Exit {
                    self.stop(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(bridge) = self.bridge.take() {
            bridge.shutdown();
        }
    }
}
