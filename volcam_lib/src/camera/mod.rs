//! Cameras and camera sources
//!
//! Every camera source ([`ArcballCamera`], [`orbit_cameras`], view files)
//! produces [`CameraPose`]s, the renderer consumes them through [`PerspectiveCamera`].

use nalgebra::{Point3, Vector3};

mod arcball;
mod orbit;
mod perspective_camera;
mod view_file;

pub use arcball::{screen_to_arcball, ArcballCamera, PixelProjection, DEFAULT_FOV_Y};
pub use orbit::{fibonacci_sphere, orbit_cameras, DEFAULT_ORBIT_SCALE};
pub use perspective_camera::PerspectiveCamera;
pub use view_file::{format_views, parse_views, read_view_file, write_view_file};

/// Camera placement, as accepted by renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world coordinates
    pub position: Point3<f32>,
    /// Looking direction
    pub direction: Vector3<f32>,
    /// Up direction
    pub up: Vector3<f32>,
}

impl CameraPose {
    pub fn new(position: Point3<f32>, direction: Vector3<f32>, up: Vector3<f32>) -> CameraPose {
        CameraPose {
            position,
            direction,
            up,
        }
    }
}
