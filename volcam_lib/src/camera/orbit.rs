use std::f32::consts::PI;

use nalgebra::{vector, Vector3};

use crate::common::BoundBox;

use super::CameraPose;

/// Orbit radius as a fraction of the bounding box diagonal
pub const DEFAULT_ORBIT_SCALE: f32 = 0.5;

/// Distribute `n_points` evenly on a sphere with center in the origin
pub fn fibonacci_sphere(n_points: usize, radius: f32) -> Vec<Vector3<f32>> {
    let increment = PI * (3.0 - f32::sqrt(5.0));
    let offset = 2.0 / n_points as f32;

    (0..n_points)
        .map(|i| {
            let i = i as f32;
            let y = (i * offset - 1.0) + offset / 2.0;
            let r = f32::sqrt(1.0 - y * y);
            let phi = i * increment;
            vector![r * phi.cos(), y, r * phi.sin()] * radius
        })
        .collect()
}

/// Generate `n` cameras on a sphere around `bounds`, all looking at its center
///
/// # Arguments
///
/// * `scale` - Orbit radius relative to the diagonal of `bounds`
pub fn orbit_cameras(n: usize, bounds: &BoundBox, scale: f32) -> Vec<CameraPose> {
    let orbit_radius = bounds.diagonal() * scale;
    let center = bounds.center();
    log::debug!("orbit radius {orbit_radius}, {n} cameras");

    fibonacci_sphere(n, orbit_radius)
        .into_iter()
        .map(|p| CameraPose::new(center + p, (-p).normalize(), vector![0.0, -1.0, 0.0]))
        .collect()
}
