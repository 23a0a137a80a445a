use nalgebra::{vector, Point3, Vector2, Vector3};

use crate::common::Ray;

use super::{CameraPose, DEFAULT_FOV_Y};

/// Ray-casting camera
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Position of the camera in world coordinates
    position: Point3<f32>,
    /// Up direction from the camera's perspective, unit
    up: Vector3<f32>,
    /// Right direction from the camera's perspective, unit
    right: Vector3<f32>,
    /// Direction of camera, unit
    direction: Vector3<f32>,
    /// Aspect ratio of image plane
    aspect: f32,
    /// Vertical Field of View in degrees
    fov_y: f32,
    /// Size of image plane, calculated from fov_y and aspect
    img_plane_size: Vector2<f32>,
    /// Direction of ray passing through pixel \[0,0\]
    dir_00: Vector3<f32>, // upper left corner, in line with buffer convention
    /// Offset across the whole image plane, left to right
    du: Vector3<f32>,
    /// Offset across the whole image plane, top to bottom
    dv: Vector3<f32>,
}

impl PerspectiveCamera {
    /// Construct new camera
    ///
    /// # Arguments
    ///
    /// * `position` - Position of the camera in world coordinates
    /// * `direction` - Looking direction of the camera
    /// * `up` - Approximate up direction, must not be parallel with `direction`
    ///
    /// # Notes
    ///
    /// Default fov is 60 degrees, default aspect ratio is 1. To change it,
    /// call [`change_aspect_from_resolution`](PerspectiveCamera::change_aspect_from_resolution),
    /// [`change_fov`](PerspectiveCamera::change_fov), [`change_aspect`](PerspectiveCamera::change_aspect)
    pub fn new(position: Point3<f32>, direction: Vector3<f32>, up: Vector3<f32>) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera {
            position,
            up,
            right: Vector3::zeros(),
            direction,
            aspect: 1.0,
            fov_y: DEFAULT_FOV_Y,
            img_plane_size: Vector2::zeros(),
            dir_00: Vector3::zeros(),
            du: Vector3::zeros(),
            dv: Vector3::zeros(),
        };
        camera.recalc_plane_size();
        camera.recalc_plane();
        camera
    }

    pub fn from_pose(pose: &CameraPose) -> PerspectiveCamera {
        PerspectiveCamera::new(pose.position, pose.direction, pose.up)
    }

    /// Changes aspect ratio to match `(width, height)` resolution
    ///
    /// # Example
    ///
    /// ```
    /// use volcam_lib::camera::PerspectiveCamera;
    /// use nalgebra::{vector, point};
    ///
    /// let mut camera = PerspectiveCamera::new(
    ///     point![0.0, 0.0, 0.0],
    ///     vector![1.0, 0.0, 0.0],
    ///     vector![0.0, 1.0, 0.0],
    /// );
    ///
    /// camera.change_aspect_from_resolution(1280, 720);
    /// // has the same effect as
    /// camera.change_aspect(1280.0 / 720.0);
    /// ```
    pub fn change_aspect_from_resolution(&mut self, width: u32, height: u32) {
        let aspect = (width as f32) / (height as f32);
        self.change_aspect(aspect);
    }

    /// Change vertical FoV of camera
    ///
    /// # Arguments
    ///
    /// * `vertical_fov_deg` - vertical FoV in degrees
    pub fn change_fov(&mut self, vertical_fov_deg: f32) {
        assert!(vertical_fov_deg > 0.0 && vertical_fov_deg < 180.0);
        self.fov_y = vertical_fov_deg;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    /// Change aspect ratio of camera
    ///
    /// For example 1.7777 for 16:9 ratio
    pub fn change_aspect(&mut self, aspect_ratio: f32) {
        self.aspect = aspect_ratio;
        self.recalc_plane_size();
        self.recalc_dudv();
    }

    // Call when camera direction or up changed
    fn recalc_plane(&mut self) {
        self.direction = self.direction.normalize();
        self.right = self.direction.cross(&self.up).normalize();
        self.up = self.right.cross(&self.direction);
        self.recalc_dudv();
    }

    // Call when fov or aspect ratio changed
    fn recalc_plane_size(&mut self) {
        let height = 2.0 * f32::tan(f32::to_radians(0.5 * self.fov_y));
        self.img_plane_size = vector![height * self.aspect, height];
    }

    fn recalc_dudv(&mut self) {
        self.du = self.img_plane_size.x * self.right;
        self.dv = -self.img_plane_size.y * self.up; // Notice '-' sign, pointing downwards
        self.dir_00 = self.direction - 0.5 * self.du - 0.5 * self.dv;
    }

    /// Get ray originating in the camera position crossing view plane in coordinates `pixel_coord`
    ///
    /// # Arguments
    ///
    /// * pixel_coord - Coordinates in the range of `<0;1>x<0;1>`, point \[0,0\] being upper left corner
    pub fn get_ray(&self, pixel_coord: (f32, f32)) -> Ray {
        let dir = self.dir_00 + self.du * pixel_coord.0 + self.dv * pixel_coord.1;
        Ray::new(self.position, dir.normalize())
    }

    pub fn get_pos(&self) -> Point3<f32> {
        self.position
    }

    pub fn get_dir(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn get_up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn get_fov(&self) -> f32 {
        self.fov_y
    }
}
