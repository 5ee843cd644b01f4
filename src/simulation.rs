//! # Simulation State
//!
//! Everything the viewer mutates between frames lives in one [`Simulation`] value that the
//! event loop hands to the tick, input, GUI and render entry points.

use nalgebra_glm as glm;

use crate::camera::Camera;
use crate::clock::SimulationClock;
use crate::controls::Command;
use crate::params::RenderParams;
use crate::store::MeshStore;

pub struct Simulation {
    pub store: MeshStore,
    pub clock: SimulationClock,
    pub params: RenderParams,
    pub camera: Camera,
}

impl Simulation {
    pub const FIELD_OF_VIEW: f32 = 60.0;
    pub const NEAR: f32 = 0.005;
    pub const FAR: f32 = 5.0;

    pub fn new(store: MeshStore) -> Self {
        let mut camera = Camera::default();
        camera.translate(glm::vec3(0.0, 0.0, -2.0));

        Self {
            store,
            clock: SimulationClock::default(),
            params: RenderParams::default(),
            camera,
        }
    }

    /// One fixed-period simulation step of `dt` seconds.
    ///
    /// The mesh is animated for the current clock time before the clock moves on, so the first
    /// tick after a reset shows the mesh at exactly `t = 0`. A paused simulation leaves the mesh
    /// untouched.
    pub fn tick(&mut self, dt: f32) {
        if !self.clock.is_running() {
            return;
        }
        self.store.animate(self.clock.time());
        self.clock.advance(dt);
    }

    /// Applies a keyboard command. Returns `false` when the viewer should quit.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::ResetClock => self.clock.reset(),
            Command::TogglePause => {
                self.clock.toggle();
                log::debug!("Simulation running: {}", self.clock.is_running());
            }
            Command::ToggleMesh => self.params.show_mesh = !self.params.show_mesh,
            Command::TogglePoints => self.params.show_points = !self.params.show_points,
            Command::CycleShading => {
                self.params.shading = self.params.shading.next();
                log::debug!("Shading: {}", self.params.shading.label());
            }
            Command::ToggleWireframe => self.params.show_wireframe = !self.params.show_wireframe,
            Command::Quit => return false,
        }
        true
    }

    /// Matches the projection to a new window size. Zero-sized windows (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let aspect = width as f32 / height as f32;
        self.camera
            .set_perspective(Self::FIELD_OF_VIEW, aspect, Self::NEAR, Self::FAR);
    }
}
