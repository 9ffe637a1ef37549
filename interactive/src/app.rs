use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use std::collections::HashMap;
use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use glspin::config::{ConfigError, DemoConfig};
use glspin::scene::ShadingKind;
use glspin::stats::FrameStats;
use glspin::DemoScene;

use gl_wrapper::geometry::{GBError, Geometry, GeometryBuilder};
use gl_wrapper::program::{PBError, Program};
use gl_wrapper::renderer::GlRenderer;

use crate::shaders;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    scene: DemoScene,
    programs: HashMap<ShadingKind, Program>,
    /// Same order as `scene.objects`
    geometries: Vec<Geometry>,
    gl_renderer: GlRenderer,
}

impl App {
    pub fn new(mut scene: DemoScene, config: &DemoConfig) -> Result<Self, AppError> {
        scene.apply_config(config)?;

        let title = config.title.as_deref().unwrap_or(scene.demo.title());

        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(config.width, config.height)))
            .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
            .with_title(title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new().with_depth_size(24);

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                // find_configs already failed with BadConfig when nothing matched the
                // template, and that error comes back through `build` below
                configs
                    .reduce(|best, c| {
                        if c.depth_size() > best.depth_size() {
                            c
                        } else {
                            best
                        }
                    })
                    .expect("find_configs yields at least one config")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Display("no window created".to_string()))?;

        let handle = Some(window.raw_window_handle());
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(handle);

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| match CString::new(s) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        log::info!(
            "OpenGL {} on {}",
            gl_wrapper::get_string(gl::VERSION).unwrap_or_default(),
            gl_wrapper::get_string(gl::RENDERER).unwrap_or_default()
        );

        if config.vsync {
            let interval = SwapInterval::Wait(NonZeroU32::new(1).ok_or(AppError::ZeroSize)?);
            if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
                log::warn!("Could not enable vsync: {e}");
            }
        }

        let programs = shaders::build_programs(&scene.shading_kinds())?;

        let mut geometries = Vec::with_capacity(scene.objects.len());
        for object in &scene.objects {
            let program = programs
                .get(&object.shading.kind())
                .ok_or(AppError::MissingProgram(object.shading.kind()))?;

            let mut builder = GeometryBuilder::new(&object.mesh.vertices)
                .with_primitive(shaders::primitive(object.mesh.topology));

            for attribute in &object.mesh.layout {
                builder =
                    builder.with_attribute(attribute.name(), shaders::vertex_attribute(*attribute));
            }

            if let Some(indices) = &object.mesh.indices {
                builder = builder.with_indices(indices);
            }

            let geometry = builder.build(program)?;
            log::debug!(
                "Uploaded {} vertices, {} elements",
                geometry.vertices(),
                geometry.elements()
            );
            geometries.push(geometry);
        }

        let mut gl_renderer = GlRenderer::new();
        gl_renderer.set_depth_test(scene.depth_test);

        let size = gl_window.window.inner_size();
        gl_renderer.resize(size.width, size.height);

        log::info!("Running demo: {}", scene.demo);

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            scene,
            programs,
            geometries,
            gl_renderer,
        })
    }

    pub fn run(mut self) -> ! {
        let mut size = self.gl_window.window.inner_size();
        let mut stats = FrameStats::default();

        self.event_loop
            .run(move |event, _window_target, control_flow| {
                *control_flow = ControlFlow::Wait;
                match event {
                    Event::RedrawEventsCleared => {
                        self.gl_window.window.request_redraw();
                    }
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::Resized(new_size) => {
                            if let (Some(w), Some(h)) = (
                                NonZeroU32::new(new_size.width),
                                NonZeroU32::new(new_size.height),
                            ) {
                                self.gl_window.surface.resize(&self.gl_context, w, h);
                                self.gl_renderer.resize(new_size.width, new_size.height);
                                size = new_size;
                            }
                        }
                        WindowEvent::KeyboardInput { input, .. } => {
                            if input.virtual_keycode == Some(VirtualKeyCode::Escape)
                                && input.state == ElementState::Pressed
                            {
                                control_flow.set_exit();
                            }
                        }
                        WindowEvent::CloseRequested => {
                            control_flow.set_exit();
                        }
                        _ => (),
                    },
                    Event::RedrawRequested(_) => {
                        let now = Instant::now();
                        self.scene.spinner.tick(now);

                        let aspect = size.width as f32 / size.height.max(1) as f32;
                        let [r, g, b] = self.scene.clear_color;
                        self.gl_renderer.clear_color(r, g, b);

                        for (object, geometry) in self.scene.objects.iter().zip(&self.geometries) {
                            let Some(program) = self.programs.get(&object.shading.kind()) else {
                                continue;
                            };

                            let transforms = self.scene.object_transforms(object, aspect);
                            shaders::upload_uniforms(
                                &mut self.gl_renderer,
                                program,
                                &object.shading,
                                &transforms,
                                self.scene.light.as_ref(),
                            );
                            self.gl_renderer.draw(geometry, program);
                        }

                        if let Err(e) = self.gl_window.surface.swap_buffers(&self.gl_context) {
                            log::error!("Buffer swap failed: {e}");
                            control_flow.set_exit();
                        }

                        if let Some(fps) = stats.frame(now) {
                            log::debug!("{:.1} fps", fps);
                        }
                    }
                    Event::LoopDestroyed => {
                        log::info!("Exiting");
                    }
                    _ => (),
                }
            })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not create display: {0}")]
    Display(String),
    #[error("GL error: {0}")]
    Context(#[from] glutin::error::Error),
    #[error("Window has a zero sized dimension")]
    ZeroSize,
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Shader program: {0}")]
    Program(#[from] PBError),
    #[error("Geometry: {0}")]
    Geometry(#[from] GBError),
    #[error("No program for {0:?} shading")]
    MissingProgram(ShadingKind),
    #[error("Could not serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}
