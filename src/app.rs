//! # Application Core (`app.rs`)
//!
//! The `App` struct is the `winit` driver of the viewer. It implements [`ApplicationHandler`]
//! and turns window events into calls on the [`Simulation`] and the [`Renderer`]:
//!
//! | Event                          | Effect                                                   |
//! |--------------------------------|----------------------------------------------------------|
//! | `resumed` (first time)         | create window, `egui` state and the GPU renderer         |
//! | `RedrawRequested`              | run due simulation ticks, build the GUI, render a frame  |
//! | `Resized`                      | resize surface and depth buffer, update camera aspect    |
//! | `KeyboardInput`                | map the key to a [`Command`] and apply it                |
//! | `MouseInput` / `CursorMoved`   | drive the trackball camera                               |
//! | `CloseRequested` / `Escape`    | release GPU resources and leave the event loop           |
//!
//! ## Simulation ticks
//!
//! Simulation time advances in fixed periods regardless of the display rate. Every redraw adds
//! the wall-clock time since the previous redraw to a [`FixedTimestep`] and runs as many ticks as
//! have become due.
//!
//! ## Input routing
//!
//! `egui` sees every window event first. Events it consumes (typing in a widget, dragging a
//! slider) never reach the camera or the key bindings.

use std::sync::Arc;

use web_time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Theme, Window},
};

use crate::clock::FixedTimestep;
use crate::controls::{Command, DragMode, MouseDrag};
use crate::gui;
use crate::renderer::Renderer;
use crate::simulation::Simulation;

/// The `winit` application: owns the simulation and, once the window exists, the GPU renderer.
pub struct App {
    /// Mesh store, clock, render parameters and camera.
    simulation: Simulation,

    /// Converts elapsed wall-clock time into whole simulation ticks.
    timestep: FixedTimestep,

    /// Created on the first `resumed` event.
    window: Option<Arc<Window>>,

    /// Taken and dropped on shutdown, which releases all GPU resources.
    renderer: Option<Renderer>,

    /// `egui` input and platform state for the window.
    gui_state: Option<egui_winit::State>,

    /// Time of the previous redraw, used for ticks and the fps estimate.
    last_render_time: Option<Instant>,

    /// Inner window size in physical pixels.
    last_size: (u32, u32),

    /// Last cursor position in physical pixels.
    cursor: PhysicalPosition<f64>,

    /// Mouse button currently dragging the camera.
    drag: MouseDrag,

    /// Exponentially smoothed frame rate shown in the control panel.
    fps: f32,
}

impl App {
    /// Wraps a loaded simulation; the window and renderer are created on `resumed`.
    pub fn new(simulation: Simulation, timestep: FixedTimestep) -> Self {
        Self {
            simulation,
            timestep,
            window: None,
            renderer: None,
            gui_state: None,
            last_render_time: None,
            last_size: (0, 0),
            cursor: PhysicalPosition::new(0.0, 0.0),
            drag: MouseDrag::default(),
            fps: 0.0,
        }
    }

    /// Cursor position scaled to `[0, 1]²`, origin top left.
    fn normalized_cursor(&self) -> (f32, f32) {
        let (width, height) = self.last_size;
        (
            (self.cursor.x / width.max(1) as f64) as f32,
            (self.cursor.y / height.max(1) as f64) as f32,
        )
    }

    fn drag_camera(&mut self) {
        let (x, y) = self.normalized_cursor();
        let camera = &mut self.simulation.camera;
        match self.drag.mode() {
            Some(DragMode::Rotate) => camera.trackball_end_motion_rotate(x, y),
            Some(DragMode::Zoom) => camera.trackball_end_motion_zoom(x, y),
            Some(DragMode::Translate) => camera.trackball_end_motion_translate(x, y),
            None => {}
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.take().is_some() {
            log::info!("Released GPU resources");
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Wave")
            .with_inner_size(PhysicalSize::new(1280, 960));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                log::error!("Failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let gui_context = egui::Context::default();
        let viewport_id = gui_context.viewport_id();
        let gui_state = egui_winit::State::new(
            gui_context,
            viewport_id,
            &window,
            Some(window.scale_factor() as _),
            Some(Theme::Dark),
            None,
        );

        let PhysicalSize { width, height } = window.inner_size();
        self.last_size = (width, height);

        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            width,
            height,
            &self.simulation.store,
        ));
        self.simulation.resize(width, height);

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.gui_state = Some(gui_state);
        self.last_render_time = Some(Instant::now());
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            log::info!("Close requested. Exiting...");
            self.shutdown(event_loop);
            return;
        }

        let (Some(gui_state), Some(renderer), Some(window), Some(last_render_time)) = (
            self.gui_state.as_mut(),
            self.renderer.as_mut(),
            self.window.clone(),
            self.last_render_time.as_mut(),
        ) else {
            return;
        };

        // A drag may end over the control panel, which consumes the release.
        if let WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } = &event
        {
            self.drag.release(*button);
        }

        if gui_state.on_window_event(&window, &event).consumed {
            window.request_redraw();
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key: winit::keyboard::PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(command) = Command::from_key(key_code) {
                    if !self.simulation.apply(command) {
                        self.shutdown(event_loop);
                        return;
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if self.drag.on_mouse_input(state, button) {
                    let (x, y) = self.normalized_cursor();
                    self.simulation.camera.trackball_begin_motion(x, y);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = position;
                self.drag_camera();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing renderer surface to: ({width}, {height})");
                renderer.resize(width, height);
                self.simulation.resize(width, height);
                self.last_size = (width, height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();

                let delta_time = now - *last_render_time;
                *last_render_time = now;

                let period = self.timestep.period().as_secs_f32();
                for _ in 0..self.timestep.advance(delta_time) {
                    self.simulation.tick(period);
                }

                let frame_seconds = delta_time.as_secs_f32();
                if frame_seconds > 0.0 {
                    self.fps = 0.9 * self.fps + 0.1 / frame_seconds;
                }

                let gui_input = gui_state.take_egui_input(&window);
                gui_state.egui_ctx().begin_pass(gui_input);

                gui::control_panel(gui_state.egui_ctx(), &mut self.simulation, self.fps);

                let egui_winit::egui::FullOutput {
                    textures_delta,
                    shapes,
                    pixels_per_point,
                    platform_output,
                    ..
                } = gui_state.egui_ctx().end_pass();

                gui_state.handle_platform_output(&window, platform_output);

                let paint_jobs = gui_state.egui_ctx().tessellate(shapes, pixels_per_point);

                let screen_descriptor = {
                    let (width, height) = self.last_size;
                    egui_wgpu::ScreenDescriptor {
                        size_in_pixels: [width, height],
                        pixels_per_point: window.scale_factor() as f32,
                    }
                };

                renderer.render_frame(screen_descriptor, paint_jobs, textures_delta, &self.simulation);
            }
            _ => (),
        }

        window.request_redraw();
    }
}
