use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use cgmath::Matrix4;

use log::{debug, info};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, GeometryError, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::TRIANGLE;

use crate::args::Args;
use crate::frame::FrameState;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    program: Program,
    geometry: Geometry,
    start: Instant,
    speed: f32,
}

impl App {
    pub fn new(args: &Args) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(args.width, args.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title("tridrift");
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| configs.next().unwrap())
            .map_err(|_| AppError::WindowCreation)?;

        let window = window.ok_or(AppError::WindowCreation)?;
        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        if !gl::DrawArrays::is_loaded() {
            return Err(AppError::LoaderInit);
        }

        info!("OpenGL 3.3 core context created");

        let program = ProgramBuilder::new(
            include_str!("gl_shaders/drift.glsl"),
            include_str!("gl_shaders/color.glsl"),
        )
        .build()?;

        let geometry = GeometryBuilder::new(&TRIANGLE)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        debug!("shader program and triangle geometry uploaded");

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            program,
            geometry,
            start: Instant::now(),
            speed: args.speed,
        })
    }

    pub fn run(self) -> ! {
        let mut renderer = GlRenderer::new();

        self.event_loop.run(move |event, _window_target, control_flow| {
            control_flow.set_poll();
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            self.gl_window.surface.resize(
                                &self.gl_context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                            renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if let Some(key) = input.virtual_keycode {
                            if input.state == ElementState::Pressed && is_close_key(key) {
                                control_flow.set_exit();
                            }
                        }
                    }
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    renderer.clear_color(0.2, 0.3, 0.3);

                    let frame = FrameState::at(self.start.elapsed().as_secs_f32());
                    let transform: Matrix4<f32> = frame.transform(self.speed);

                    self.program
                        .set_uniform_mat4("transform", transform.as_ref())
                        .unwrap();

                    renderer.draw(&self.geometry, &self.program);
                }
                Event::RedrawEventsCleared => {
                    self.gl_window.window.request_redraw();
                    self.gl_window
                        .surface
                        .swap_buffers(&self.gl_context)
                        .unwrap();
                }
                _ => (),
            }
        })
    }
}

/// Escape is the only key that closes the window.
fn is_close_key(key: VirtualKeyCode) -> bool {
    matches!(key, VirtualKeyCode::Escape)
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, glutin::error::Error> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width.max(1)).unwrap(),
            NonZeroU32::new(height.max(1)).unwrap(),
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("could not create window")]
    WindowCreation,
    #[error("could not initialize OpenGL context: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("could not load OpenGL function table")]
    LoaderInit,
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_closes_the_window() {
        assert!(is_close_key(VirtualKeyCode::Escape));
    }

    #[test]
    fn other_keys_do_not() {
        assert!(!is_close_key(VirtualKeyCode::A));
        assert!(!is_close_key(VirtualKeyCode::Space));
        assert!(!is_close_key(VirtualKeyCode::Return));
    }
}
