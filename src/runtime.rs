//! Window, OpenGL context and the render loop.
//!
//! winit drives the loop with [`ControlFlow::Poll`]: every frame requests
//! the next redraw. Window events are translated into [`InputHandler`]
//! calls on [`App`]; everything GL-related lives in `Graphics`.

use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{
    DeviceEvent, DeviceId, ElementState, MouseButton as WinitMouseButton, MouseScrollDelta,
    WindowEvent,
};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::app::App;
use crate::config::DemoConfig;
use crate::gl::GlBackend;
use crate::input::{ButtonState, InputHandler, Key, MouseButton};
use crate::renderer::SceneRenderer;
use crate::texture::decode_texture_file;
use crate::time::FrameClock;

/// Pixels of touchpad scrolling that count as one wheel line.
const PIXELS_PER_LINE: f64 = 20.0;

/// Open the window and run until the user quits.
///
/// # Errors
///
/// Returns an error if the event loop, window, GL context or scene cannot
/// be created, or if presenting a frame fails.
pub fn run(config: DemoConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut runtime = DemoRuntime::new(config);
    event_loop
        .run_app(&mut runtime)
        .context("winit event loop terminated with error")?;

    match runtime.error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// The window, its GL context and the scene drawn into it.
///
/// Fields drop in declaration order; the renderer's objects are released
/// explicitly in [`destroy`](Self::destroy) while the context is still
/// current.
struct Graphics {
    renderer: SceneRenderer<glow::Context>,
    gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl Graphics {
    fn create(event_loop: &ActiveEventLoop, config: &DemoConfig) -> Result<Self> {
        let [width, height] = config.window_size;
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attributes))
            .build(event_loop, template, pick_config)
            .map_err(|err| anyhow!("failed to create window: {err}"))?;
        let window = window.context("display builder returned no window")?;

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();
        let gl_display = gl_config.display();
        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw_window_handle));
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .context("failed to create an OpenGL 3.3 core context")?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .context("failed to describe the window surface")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .context("failed to create the window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("failed to make the GL context current")?;

        let vsync = SwapInterval::Wait(NonZeroU32::MIN);
        if let Err(err) = surface.set_swap_interval(&context, vsync) {
            log::warn!("vsync unavailable: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };
        log::info!("OpenGL {}", unsafe { gl.get_parameter_string(glow::VERSION) });

        capture_cursor(&window);

        let image = decode_texture_file(&config.texture_path)
            .context("failed to load the scene texture")?;
        let renderer = unsafe { SceneRenderer::new(&gl, &image, config.clear_color) }
            .context("failed to build the scene")?;

        Ok(Self {
            renderer,
            gl,
            surface,
            context,
            window,
        })
    }

    fn resize(&self, size: PhysicalSize<u32>) {
        // A minimized window reports zero; the surface keeps its last size.
        let width = NonZeroU32::new(size.width);
        let height = NonZeroU32::new(size.height);
        if let (Some(width), Some(height)) = (width, height) {
            self.surface.resize(&self.context, width, height);
        }
        self.window.request_redraw();
    }

    fn draw(&self, app: &App) -> Result<()> {
        let size = self.window.inner_size();
        unsafe {
            self.renderer
                .render(&self.gl, app.camera(), [size.width, size.height]);
        }
        self.surface
            .swap_buffers(&self.context)
            .context("failed to present the frame")
    }

    fn destroy(self) {
        unsafe { self.renderer.destroy(&self.gl) };
    }
}

/// Prefer the config with the most samples; all of them carry the
/// requested depth buffer.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, config| {
            if config.num_samples() > best.num_samples() {
                config
            } else {
                best
            }
        })
        .expect("glutin offers at least one matching config")
}

/// Hide the cursor and pin it to the window. Mouse look reads raw device
/// motion, so it keeps turning while the cursor sits at an edge.
fn capture_cursor(window: &Window) {
    window.set_cursor_visible(false);
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(err) = grabbed {
        log::warn!("could not grab the cursor: {err}");
    }
}

/// winit handler: owns the app state and, once resumed, the graphics.
struct DemoRuntime {
    config: DemoConfig,
    app: App,
    clock: FrameClock,
    graphics: Option<Graphics>,
    error: Option<anyhow::Error>,
}

impl DemoRuntime {
    fn new(config: DemoConfig) -> Self {
        let app = App::new(config.camera_position);
        Self {
            config,
            app,
            clock: FrameClock::new(),
            graphics: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        self.app.request_exit();
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        if !self.app.is_running() {
            return;
        }
        let ft = self.clock.tick();
        self.app.update(ft.dt);

        let Some(graphics) = &self.graphics else {
            return;
        };
        if let Err(err) = graphics.draw(&self.app) {
            self.fail(event_loop, err);
        }
    }
}

impl ApplicationHandler for DemoRuntime {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match Graphics::create(event_loop, &self.config) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
                self.clock = FrameClock::new();
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.app.on_close_requested(),
            WindowEvent::Resized(size) => {
                if let Some(graphics) = &self.graphics {
                    graphics.resize(size);
                }
            }
            WindowEvent::Focused(false) => self.app.reset_input(),
            WindowEvent::KeyboardInput { event, .. } if !event.repeat => {
                if let Some(key) = map_key(event.physical_key) {
                    self.app.on_key(key, map_state(event.state));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.app.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => self.app.on_scroll(scroll_lines(delta)),
            WindowEvent::MouseInput { state, button, .. } => {
                self.app
                    .on_mouse_button(map_mouse_button(button), map_state(state));
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }

        if !self.app.is_running() {
            event_loop.exit();
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if self.graphics.is_none() {
            return;
        }
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.app.on_mouse_motion(dx, dy);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.app.is_running() {
            event_loop.exit();
            return;
        }
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = self.graphics.take() {
            graphics.destroy();
        }
        log::info!("shutting down");
    }
}

fn map_key(key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyA => Some(Key::A),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::KeyD => Some(Key::D),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::KeyE => Some(Key::E),
        KeyCode::KeyP => Some(Key::P),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

fn map_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Right => MouseButton::Right,
        _ => MouseButton::Other,
    }
}

/// Vertical scroll in wheel lines.
fn scroll_lines(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(position) => position.y / PIXELS_PER_LINE,
    }
}
