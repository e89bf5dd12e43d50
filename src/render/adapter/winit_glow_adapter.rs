// Cubefall
// copyright zipxing@hotmail.com 2022～2025

//! # Winit Adapter Implementation
//!
//! Window and OpenGL context based on the winit + glutin + glow stack.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             WinitGlowAdapter                │
//! ├─────────────────────────────────────────────┤
//! │  Window Management  │  OpenGL Context       │
//! │  - winit::Window    │  - glutin::Context    │
//! │  - Event handling   │  - glutin::Surface    │
//! │  - Cursor grab      │  - glow::Context      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The event loop runs in pump mode: `poll_event` pumps it once per call
//! with the remaining tick time as timeout. The window and context are
//! owned by the application handler, which winit calls back into, so no
//! back pointer to the adapter is needed.

use crate::{
    error::{CubefallError, Result},
    event::{Event, KeyCode, KeyEvent, KeyEventKind},
    init::WindowConfig,
    render::adapter::{Adapter, AdapterBase},
};
use glow::HasContext;
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    prelude::GlSurface,
    surface::{Surface, SurfaceAttributesBuilder, WindowSurface},
};
use glutin_winit::DisplayBuilder;
use log::{error, info, warn};
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    raw_window_handle::HasWindowHandle,
    window::{CursorGrabMode, Window, WindowId},
};

/// Pumps allowed for the first `resumed` to arrive
const INIT_PUMP_LIMIT: usize = 200;

/// Everything that only exists once the window is up.
/// Field order is drop order: GL objects before the window.
pub struct GlWindow {
    pub gl: glow::Context,
    pub gl_surface: Surface<WindowSurface>,
    pub gl_context: PossiblyCurrentContext,
    pub window: Arc<Window>,
}

/// Winit application event handler
pub struct WinitGlowAppHandler {
    pub params: WindowConfig,
    /// Converted events waiting for the next poll
    pub pending_events: Vec<Event>,
    pub should_exit: bool,
    pub gl_window: Option<GlWindow>,
    /// Failure from window creation inside `resumed`
    pub init_error: Option<CubefallError>,
}

impl WinitGlowAppHandler {
    pub fn new(params: WindowConfig) -> Self {
        Self {
            params,
            pending_events: Vec::new(),
            should_exit: false,
            gl_window: None,
            init_error: None,
        }
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.should_exit = true;
        event_loop.exit();
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let Some(w) = &self.gl_window else {
            return;
        };
        // minimised windows report 0x0
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return;
        };
        w.gl_surface.resize(&w.gl_context, width, height);
        unsafe {
            w.gl.viewport(0, 0, size.width as i32, size.height as i32);
        }
        info!("Re-sizing window {}x{}", size.width, size.height);
        self.pending_events.push(Event::Resized {
            width: size.width,
            height: size.height,
        });
    }
}

impl ApplicationHandler for WinitGlowAppHandler {
    /// Creates window and GL context on the first resume
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gl_window.is_some() || self.init_error.is_some() {
            return;
        }
        match create_gl_window(event_loop, &self.params) {
            Ok(w) => self.gl_window = Some(w),
            Err(e) => {
                self.init_error = Some(e);
                self.exit(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.exit(event_loop),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if key_event.state == ElementState::Pressed
                    && key_event.physical_key == PhysicalKey::Code(WinitKeyCode::Escape)
                {
                    self.exit(event_loop);
                    return;
                }
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    if let Some(code) = key_code_from_winit(code) {
                        let kind = match (key_event.state, key_event.repeat) {
                            (ElementState::Released, _) => KeyEventKind::Release,
                            (ElementState::Pressed, true) => KeyEventKind::Repeat,
                            (ElementState::Pressed, false) => KeyEventKind::Press,
                        };
                        self.pending_events
                            .push(Event::Key(KeyEvent::new_with_kind(code, kind)));
                    }
                }
            }
            _ => {}
        }
    }

    /// Raw mouse motion, used while the cursor is grabbed
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.params.relative_mouse {
                self.pending_events.push(Event::MouseMotion {
                    dx: dx as f32,
                    dy: dy as f32,
                });
            }
        }
    }
}

fn window_err<E: std::fmt::Display>(e: E) -> CubefallError {
    CubefallError::Window(e.to_string())
}

fn create_gl_window(event_loop: &ActiveEventLoop, params: &WindowConfig) -> Result<GlWindow> {
    info!("Creating OpenGL window and context...");

    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let display_builder = DisplayBuilder::new().with_window_attributes(Some(
        Window::default_attributes()
            .with_title(&params.title)
            .with_inner_size(LogicalSize::new(params.width, params.height))
            .with_resizable(params.resizable),
    ));

    let (window, gl_config) = display_builder
        .build(event_loop, template, |configs| {
            // glutin reports an empty config list as an error before picking
            configs
                .reduce(|accum, config| {
                    if config.num_samples() > accum.num_samples() {
                        config
                    } else {
                        accum
                    }
                })
                .expect("no GL config to pick from")
        })
        .map_err(window_err)?;

    let window = Arc::new(window.ok_or_else(|| window_err("display builder returned no window"))?);
    let physical_size = window.inner_size();
    info!(
        "Window created - logical: {}x{}, physical: {}x{}",
        params.width, params.height, physical_size.width, physical_size.height
    );

    let gl_display = gl_config.display();
    let raw_window_handle = window.window_handle().map_err(window_err)?.as_raw();
    let context_attributes = ContextAttributesBuilder::new()
        .with_profile(GlProfile::Core)
        .with_context_api(ContextApi::OpenGl(Some(Version::new(
            params.gl_major,
            params.gl_minor,
        ))))
        .build(Some(raw_window_handle));
    let not_current_gl_context = unsafe {
        gl_display
            .create_context(&gl_config, &context_attributes)
            .map_err(window_err)?
    };

    let (Some(width), Some(height)) = (
        NonZeroU32::new(physical_size.width),
        NonZeroU32::new(physical_size.height),
    ) else {
        return Err(window_err("window has zero size"));
    };
    let attrs =
        SurfaceAttributesBuilder::<WindowSurface>::new().build(raw_window_handle, width, height);
    let gl_surface = unsafe {
        gl_display
            .create_window_surface(&gl_config, &attrs)
            .map_err(window_err)?
    };
    let gl_context = not_current_gl_context
        .make_current(&gl_surface)
        .map_err(window_err)?;

    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s))
    };
    unsafe {
        gl.viewport(0, 0, physical_size.width as i32, physical_size.height as i32);
    }

    if params.relative_mouse {
        if let Err(e) = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
        {
            warn!("cursor grab unavailable: {}", e);
        }
        window.set_cursor_visible(false);
    }

    info!("OpenGL window & context initialized successfully");
    Ok(GlWindow {
        gl,
        gl_surface,
        gl_context,
        window,
    })
}

/// Keys the scenes understand; everything else is dropped
pub fn key_code_from_winit(code: WinitKeyCode) -> Option<KeyCode> {
    let c = match code {
        WinitKeyCode::Space => ' ',
        WinitKeyCode::KeyA => 'a',
        WinitKeyCode::KeyB => 'b',
        WinitKeyCode::KeyC => 'c',
        WinitKeyCode::KeyD => 'd',
        WinitKeyCode::KeyE => 'e',
        WinitKeyCode::KeyF => 'f',
        WinitKeyCode::KeyG => 'g',
        WinitKeyCode::KeyH => 'h',
        WinitKeyCode::KeyI => 'i',
        WinitKeyCode::KeyJ => 'j',
        WinitKeyCode::KeyK => 'k',
        WinitKeyCode::KeyL => 'l',
        WinitKeyCode::KeyM => 'm',
        WinitKeyCode::KeyN => 'n',
        WinitKeyCode::KeyO => 'o',
        WinitKeyCode::KeyP => 'p',
        WinitKeyCode::KeyQ => 'q',
        WinitKeyCode::KeyR => 'r',
        WinitKeyCode::KeyS => 's',
        WinitKeyCode::KeyT => 't',
        WinitKeyCode::KeyU => 'u',
        WinitKeyCode::KeyV => 'v',
        WinitKeyCode::KeyW => 'w',
        WinitKeyCode::KeyX => 'x',
        WinitKeyCode::KeyY => 'y',
        WinitKeyCode::KeyZ => 'z',
        WinitKeyCode::Digit0 => '0',
        WinitKeyCode::Digit1 => '1',
        WinitKeyCode::Digit2 => '2',
        WinitKeyCode::Digit3 => '3',
        WinitKeyCode::Digit4 => '4',
        WinitKeyCode::Digit5 => '5',
        WinitKeyCode::Digit6 => '6',
        WinitKeyCode::Digit7 => '7',
        WinitKeyCode::Digit8 => '8',
        WinitKeyCode::Digit9 => '9',
        WinitKeyCode::ArrowUp => return Some(KeyCode::Up),
        WinitKeyCode::ArrowDown => return Some(KeyCode::Down),
        WinitKeyCode::ArrowLeft => return Some(KeyCode::Left),
        WinitKeyCode::ArrowRight => return Some(KeyCode::Right),
        WinitKeyCode::Enter => return Some(KeyCode::Enter),
        WinitKeyCode::Tab => return Some(KeyCode::Tab),
        WinitKeyCode::Backspace => return Some(KeyCode::Backspace),
        WinitKeyCode::Escape => return Some(KeyCode::Esc),
        _ => return None,
    };
    Some(KeyCode::Char(c))
}

/// Winit + Glow OpenGL adapter
pub struct WinitGlowAdapter {
    pub base: AdapterBase,
    /// Event loop (for pump events mode)
    pub event_loop: Option<EventLoop<()>>,
    pub app_handler: Option<WinitGlowAppHandler>,
}

impl WinitGlowAdapter {
    /// No window yet, call `init`
    pub fn new(gn: &str, project_path: &str) -> Self {
        Self {
            base: AdapterBase::new(gn, project_path),
            event_loop: None,
            app_handler: None,
        }
    }

    pub fn window(&self) -> Option<&Window> {
        self.app_handler
            .as_ref()?
            .gl_window
            .as_ref()
            .map(|w| w.window.as_ref())
    }
}

impl Adapter for WinitGlowAdapter {
    fn init(&mut self, cfg: &WindowConfig) -> Result<()> {
        info!("Initializing WinitGlow adapter with OpenGL backend...");
        let mut event_loop = EventLoop::new().map_err(window_err)?;
        let mut handler = WinitGlowAppHandler::new(cfg.clone());

        // window creation happens in the resumed callback
        for _ in 0..INIT_PUMP_LIMIT {
            let status = event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut handler);
            if let Some(e) = handler.init_error.take() {
                return Err(e);
            }
            if handler.gl_window.is_some() {
                break;
            }
            if let PumpStatus::Exit(_) = status {
                return Err(window_err("event loop exited during start-up"));
            }
        }
        let Some(w) = &handler.gl_window else {
            return Err(window_err("window was not created"));
        };

        let size = w.window.inner_size();
        self.base.title = cfg.title.clone();
        self.base.width = size.width;
        self.base.height = size.height;
        self.base.glsl_version = cfg.glsl_version();
        self.event_loop = Some(event_loop);
        self.app_handler = Some(handler);
        Ok(())
    }

    fn get_base(&mut self) -> &mut AdapterBase {
        &mut self.base
    }

    fn poll_event(&mut self, timeout: Duration, es: &mut Vec<Event>) -> bool {
        if let (Some(event_loop), Some(app_handler)) =
            (self.event_loop.as_mut(), self.app_handler.as_mut())
        {
            let status = event_loop.pump_app_events(Some(timeout), app_handler);
            for event in app_handler.pending_events.drain(..) {
                if let Event::Resized { width, height } = event {
                    self.base.width = width;
                    self.base.height = height;
                }
                es.push(event);
            }
            if app_handler.should_exit {
                return true;
            }
            if let PumpStatus::Exit(_) = status {
                return true;
            }
            return false;
        }
        true
    }

    fn gl(&self) -> Option<&glow::Context> {
        self.app_handler
            .as_ref()?
            .gl_window
            .as_ref()
            .map(|w| &w.gl)
    }

    fn post_draw(&mut self) {
        if let Some(w) = self.app_handler.as_ref().and_then(|h| h.gl_window.as_ref()) {
            if let Err(e) = w.gl_surface.swap_buffers(&w.gl_context) {
                error!("Failed to swap buffers: {:?}", e);
            }
            w.window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_map_to_keys() {
        assert_eq!(key_code_from_winit(WinitKeyCode::KeyW), Some(KeyCode::Char('w')));
        assert_eq!(key_code_from_winit(WinitKeyCode::KeyA), Some(KeyCode::Char('a')));
        assert_eq!(key_code_from_winit(WinitKeyCode::ArrowLeft), Some(KeyCode::Left));
        assert_eq!(key_code_from_winit(WinitKeyCode::Escape), Some(KeyCode::Esc));
        assert_eq!(key_code_from_winit(WinitKeyCode::F1), None);
    }

    #[test]
    fn adapter_without_window_has_no_gl() {
        let mut ad = WinitGlowAdapter::new("glass", ".");
        assert!(ad.gl().is_none());
        assert!(ad.window().is_none());
        let mut es = vec![];
        // nothing to pump, treated as exit
        assert!(ad.poll_event(Duration::from_millis(1), &mut es));
        assert!(es.is_empty());
        assert_eq!(ad.get_base().game_name, "glass");
    }
}
