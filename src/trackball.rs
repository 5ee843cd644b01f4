//! Virtual trackball mapping two mouse positions to a rotation.
//!
//! Points are in normalized device coordinates (`[-1, 1]²`, y up). Each one is lifted onto a
//! sphere of radius [`RADIUS`] near the center and onto a hyperbolic sheet further out, which
//! keeps the mapping continuous at the window edges.

use nalgebra_glm as glm;

pub const RADIUS: f32 = 0.8;

/// Rotation of the camera orientation that makes the scene follow a drag from `u0` to `u1`.
pub fn trackball(u0: glm::Vec2, u1: glm::Vec2) -> glm::Quat {
    let p0 = lift(u0);
    let p1 = lift(u1);

    let axis = glm::cross(&p1, &p0);
    if glm::length(&axis) < 1e-6 {
        return glm::quat_identity();
    }

    let t = (glm::distance(&p0, &p1) / (2.0 * RADIUS)).clamp(-1.0, 1.0);
    let phi = 2.0 * t.asin();

    glm::quat_angle_axis(phi, &glm::normalize(&axis))
}

fn lift(u: glm::Vec2) -> glm::Vec3 {
    let d = glm::length(&u);
    let z = if d < RADIUS * std::f32::consts::FRAC_1_SQRT_2 {
        (RADIUS * RADIUS - d * d).sqrt()
    } else {
        let t = RADIUS * std::f32::consts::FRAC_1_SQRT_2;
        t * t / d
    };
    glm::vec3(u.x, u.y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_motion_is_identity() {
        let q = trackball(glm::vec2(0.2, -0.1), glm::vec2(0.2, -0.1));
        assert_eq!(q, glm::quat_identity());
    }

    #[test]
    fn result_is_unit_quaternion() {
        let q = trackball(glm::vec2(-0.9, 0.4), glm::vec2(0.7, -0.95));
        assert_relative_eq!(glm::quat_length(&q), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn horizontal_drag_rotates_about_vertical_axis() {
        let q = trackball(glm::vec2(0.0, 0.0), glm::vec2(0.5, 0.0));
        let axis = glm::quat_axis(&q);
        assert_relative_eq!(axis.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(axis.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn lifted_points_are_continuous_at_the_seam() {
        let edge = RADIUS * std::f32::consts::FRAC_1_SQRT_2;
        let inside = lift(glm::vec2(edge - 1e-4, 0.0));
        let outside = lift(glm::vec2(edge + 1e-4, 0.0));
        assert_relative_eq!(inside.z, outside.z, epsilon = 1e-3);
    }
}
