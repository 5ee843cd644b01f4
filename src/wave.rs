//! # Wave Displacement
//!
//! A travelling ripple under a Gaussian envelope that sweeps back and forth across the mesh.
//! Every vertex is pushed along its rest-pose normal by
//!
//! ```text
//! x = p0.x + p0.y + p0.z
//! u = 5 (x - 0.75 sin(2.5 t))
//! w = a/2 (1 + sin(k x + v t))
//! d = exp(-u²) w
//! ```
//!
//! with `k = 50`, `a = 0.03` and `v = 10`. Because `exp(-u²)` is in `[0, 1]` and `w` is in
//! `[0, a]`, the displacement never leaves `[0, a]`.

use nalgebra_glm as glm;

/// Spatial frequency `k` of the ripple.
pub const WAVE_NUMBER: f32 = 50.0;

/// Peak displacement `a`.
pub const AMPLITUDE: f32 = 0.03;

/// Phase speed `v` of the ripple.
pub const PHASE_SPEED: f32 = 10.0;

/// Displacement magnitude along the rest normal for a vertex at `rest` at time `time`.
pub fn displacement(rest: &glm::Vec3, time: f32) -> f32 {
    let x = rest.x + rest.y + rest.z;

    let u = 5.0 * (x - 0.75 * (2.5 * time).sin());
    let w = (AMPLITUDE / 2.0) * (1.0 + (WAVE_NUMBER * x + PHASE_SPEED * time).sin());

    (-u * u).exp() * w
}

/// Writes the displaced positions for `time` into `out`, one per rest vertex.
pub fn displace(
    rest_vertices: &[glm::Vec3],
    rest_normals: &[glm::Vec3],
    time: f32,
    out: &mut [glm::Vec3],
) {
    for ((p, p0), n0) in out.iter_mut().zip(rest_vertices).zip(rest_normals) {
        *p = *p0 + displacement(p0, time) * *n0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn origin_at_time_zero() {
        assert_relative_eq!(displacement(&glm::Vec3::zeros(), 0.0), 0.015, epsilon = 1e-7);
    }

    #[test]
    fn displacement_stays_within_amplitude() {
        for i in -40..=40 {
            for j in 0..50 {
                let s = i as f32 * 0.025;
                let rest = glm::vec3(s, -0.3 * s, 0.7 * s);
                let d = displacement(&rest, j as f32 * 0.137);
                assert!((0.0..=AMPLITUDE).contains(&d), "d = {d} out of range");
            }
        }
    }

    #[test]
    fn far_from_envelope_is_still() {
        // x = 3 is well outside the envelope, which never leaves |x| <= 0.75.
        let d = displacement(&glm::vec3(1.0, 1.0, 1.0), 0.4);
        assert!(d < 1e-20);
    }

    #[test]
    fn moves_along_rest_normal() {
        let rest = [glm::Vec3::zeros()];
        let normals = [glm::vec3(0.0, 1.0, 0.0)];
        let mut out = [glm::vec3(7.0, 7.0, 7.0)];
        displace(&rest, &normals, 0.0, &mut out);

        assert_relative_eq!(out[0].x, 0.0);
        assert_relative_eq!(out[0].y, 0.015, epsilon = 1e-7);
        assert_relative_eq!(out[0].z, 0.0);
    }
}
