//! # Camera
//!
//! A trackball camera: the scene is rotated about its origin by the inverse of the camera
//! orientation and then shifted by a view-space translation. The projection is a symmetric
//! perspective frustum mapped to the `0..1` depth range that `wgpu` expects.
//!
//! Mouse gestures are fed in as window coordinates normalized to `[0, 1]²` (origin top left):
//! call [`Camera::trackball_begin_motion`] on press, then one of the `trackball_end_motion_*`
//! methods on every cursor move while the button is held.

use nalgebra_glm as glm;

use crate::trackball::trackball;

/// Clip planes of a perspective view volume, measured on the near plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone)]
pub struct Camera {
    translation: glm::Vec3,
    orientation: glm::Quat,
    frustum: Frustum,
    modelview: glm::Mat4,
    projection: glm::Mat4,
    begin: glm::Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            translation: glm::Vec3::zeros(),
            orientation: glm::quat_identity(),
            frustum: Frustum {
                left: -1.0,
                right: 1.0,
                bottom: -1.0,
                top: 1.0,
                near: 0.25,
                far: 10.0,
            },
            modelview: glm::Mat4::identity(),
            projection: glm::Mat4::identity(),
            begin: glm::Vec2::zeros(),
        };
        camera.set_perspective(60.0, 4.0 / 3.0, 0.25, 10.0);
        camera
    }
}

impl Camera {
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn modelview(&self) -> &glm::Mat4 {
        &self.modelview
    }

    pub fn projection(&self) -> &glm::Mat4 {
        &self.projection
    }

    pub fn set_perspective(&mut self, fovy_degrees: f32, aspect: f32, near: f32, far: f32) {
        let top = (fovy_degrees.to_radians() / 2.0).tan() * near;
        let right = top * aspect;
        self.frustum = Frustum {
            left: -right,
            right,
            bottom: -top,
            top,
            near,
            far,
        };
        self.update_projection();
    }

    pub fn translate(&mut self, translation: glm::Vec3) {
        self.translation += translation;
        self.update_modelview();
    }

    pub fn rotate(&mut self, rotation: glm::Quat) {
        self.orientation = glm::quat_normalize(&(self.orientation * rotation));
        self.update_modelview();
    }

    pub fn trackball_begin_motion(&mut self, x: f32, y: f32) {
        self.begin = glm::vec2(x, y);
    }

    pub fn trackball_end_motion_rotate(&mut self, x: f32, y: f32) {
        let u0 = glm::vec2(2.0 * self.begin.x - 1.0, 1.0 - 2.0 * self.begin.y);
        let u1 = glm::vec2(2.0 * x - 1.0, 1.0 - 2.0 * y);
        self.rotate(trackball(u0, u1));
        self.trackball_begin_motion(x, y);
    }

    pub fn trackball_end_motion_zoom(&mut self, x: f32, y: f32) {
        let dy = y - self.begin.y;
        self.translate(glm::vec3(0.0, 0.0, 2.0 * dy));
        self.trackball_begin_motion(x, y);
    }

    pub fn trackball_end_motion_translate(&mut self, x: f32, y: f32) {
        let dx = x - self.begin.x;
        let dy = y - self.begin.y;
        self.translate(glm::vec3(2.0 * dx, -2.0 * dy, 0.0));
        self.trackball_begin_motion(x, y);
    }

    /// The frustum is always symmetric, so it is fully described by its vertical field of view
    /// and aspect ratio.
    fn update_projection(&mut self) {
        let Frustum {
            right,
            top,
            near,
            far,
            ..
        } = self.frustum;
        let fovy = 2.0 * (top / near).atan();
        self.projection = glm::perspective_rh_zo(right / top, fovy, near, far);
    }

    fn update_modelview(&mut self) {
        let rotation = glm::quat_to_mat4(&glm::quat_inverse(&self.orientation));
        self.modelview = glm::translation(&self.translation) * rotation;
    }
}
