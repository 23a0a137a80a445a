use nalgebra::{
    vector, Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector2, Vector3,
};

use crate::common::BoundBox;

use super::CameraPose;

/// Vertical field of view the batch tools render with, in degrees
pub const DEFAULT_FOV_Y: f32 = 60.0;

/// Result of projecting a world point onto the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelProjection {
    /// Pixel coordinates, `x` from the left edge, `y` from the bottom edge
    pub pixel: Vector2<f32>,
    /// Distance from the eye, negative if the point is behind the camera
    pub depth: f32,
}

impl PixelProjection {
    /// Returned by [`ArcballCamera::world_to_pixel`] for points that cannot be projected
    pub const UNPROJECTABLE: PixelProjection = PixelProjection {
        pixel: vector![-1.0, -1.0],
        depth: f32::NAN,
    };

    pub fn is_projectable(&self) -> bool {
        !self.depth.is_nan()
    }
}

/// Camera orbiting the center of a volume, controlled by 2D input deltas.
///
/// The camera transform is `translation * rotation * center_translation`:
/// the world is moved so the center lies in the origin, rotated,
/// and pushed `distance` units along the camera z axis.
/// In camera space the eye is the origin, it looks along +z and +y is up.
#[derive(Debug, Clone)]
pub struct ArcballCamera {
    /// Zoom step in world units per unit of `zoom` input
    zoom_speed: f32,
    /// Reciprocal of viewport resolution
    inv_window_size: Vector2<f32>,
    /// Moves the center into the origin, accumulates pan
    center_translation: Translation3<f32>,
    /// Distance from the center along camera z axis
    translation: Translation3<f32>,
    rotation: UnitQuaternion<f32>,
    /// Camera space to world space, recalculated after every change
    inv_camera: Isometry3<f32>,
}

impl ArcballCamera {
    /// Construct camera framing the whole `world_bounds`
    ///
    /// # Arguments
    ///
    /// * `world_bounds` - Box to look at, camera starts one diagonal length away from its center
    /// * `window_size` - Viewport resolution in pixels, both components must be nonzero
    pub fn new(world_bounds: BoundBox, window_size: Vector2<u32>) -> ArcballCamera {
        let diag = world_bounds.size().magnitude();
        let zoom_speed = f32::max(diag / 150.0, 0.001);

        let mut camera = ArcballCamera {
            zoom_speed,
            inv_window_size: inverse_size(window_size),
            center_translation: Translation3::from(-world_bounds.center().coords),
            translation: Translation3::new(0.0, 0.0, diag),
            rotation: UnitQuaternion::identity(),
            inv_camera: Isometry3::identity(),
        };
        camera.update_camera();
        camera
    }

    /// Rotate by dragging from `from` to `to`
    ///
    /// Both points are in normalized screen coordinates `<-1;1>`,
    /// points outside the unit circle rotate around the view axis.
    pub fn rotate(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        let rotation = screen_to_arcball(to) * screen_to_arcball(from) * self.rotation;
        self.rotation = UnitQuaternion::new_normalize(rotation.into_inner());
        self.update_camera();
    }

    /// Move the eye along the view axis.
    /// Positive `amount` moves away from the center, negative towards it.
    /// Not clamped, the eye can pass through the center.
    pub fn zoom(&mut self, amount: f32) {
        let amount = amount * self.zoom_speed;
        self.translation = Translation3::new(0.0, 0.0, amount) * self.translation;
        self.update_camera();
    }

    /// Move the center in the image plane by `delta` pixels.
    /// Panning distance grows with the distance from the center.
    pub fn pan(&mut self, delta: Vector2<f32>) {
        let t = vector![
            -delta.x * self.inv_window_size.x,
            delta.y * self.inv_window_size.y,
            0.0
        ];
        let world_t = self.translation.vector.z * self.inv_camera.transform_vector(&t);
        self.center_translation = Translation3::from(world_t) * self.center_translation;
        self.update_camera();
    }

    /// Eye position in world coordinates
    pub fn eye_pos(&self) -> Point3<f32> {
        self.inv_camera.transform_point(&Point3::origin())
    }

    /// Point the camera orbits around
    pub fn center(&self) -> Point3<f32> {
        Point3::from(-self.center_translation.vector)
    }

    pub fn look_dir(&self) -> Vector3<f32> {
        self.inv_camera.transform_vector(&Vector3::z())
    }

    pub fn up_dir(&self) -> Vector3<f32> {
        self.inv_camera.transform_vector(&Vector3::y())
    }

    /// Current eye, look and up vectors, as consumed by the renderer
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.eye_pos(), self.look_dir(), self.up_dir())
    }

    pub fn zoom_speed(&self) -> f32 {
        self.zoom_speed
    }

    pub fn rotation(&self) -> UnitQuaternion<f32> {
        self.rotation
    }

    /// Update the resolution pan deltas are measured in.
    /// Does not change the camera transform.
    pub fn update_window_size(&mut self, window_size: Vector2<u32>) {
        self.inv_window_size = inverse_size(window_size);
    }

    /// Project `world_pos` to pixel coordinates of an image of `img_size`
    /// rendered from the current pose with vertical field of view `fov_y` (degrees).
    ///
    /// Returns `None` if the point is the eye or lies on the plane through the eye
    /// perpendicular to the view direction. Points outside the frame are not clipped, their
    /// coordinates fall outside `<0;img_size>`.
    pub fn try_world_to_pixel(
        &self,
        world_pos: Point3<f32>,
        img_size: Vector2<u32>,
        fov_y: f32,
    ) -> Option<PixelProjection> {
        let n = self.look_dir();
        let u = self.up_dir();
        let v = n.cross(&u);

        let to_point = world_pos - self.eye_pos();
        if to_point.magnitude() < f32::EPSILON {
            return None;
        }
        let r = to_point.normalize();

        let denom = (-r).dot(&-n);
        if denom == 0.0 {
            return None;
        }
        let t = 1.0 / denom;

        let img_size = img_size.map(|c| c as f32);
        let aspect = img_size.x / img_size.y;
        let plane_height = 2.0 * f32::tan(f32::to_radians(0.5 * fov_y));
        let img_plane_size = vector![plane_height * aspect, plane_height];

        let du = v * img_plane_size.x;
        let dv = u * img_plane_size.y;
        // lower left corner of the image plane
        let dir_00 = n - 0.5 * du - 0.5 * dv;

        let screen_dir = r * t - dir_00;
        let screen_pos = vector![
            screen_dir.dot(&du.normalize()),
            screen_dir.dot(&dv.normalize())
        ]
        .component_div(&img_plane_size);

        Some(PixelProjection {
            pixel: screen_pos.component_mul(&img_size),
            depth: t.signum() * to_point.magnitude(),
        })
    }

    /// Like [`try_world_to_pixel`](ArcballCamera::try_world_to_pixel), returns
    /// [`PixelProjection::UNPROJECTABLE`] (pixel `(-1,-1)`) instead of `None`
    pub fn world_to_pixel(
        &self,
        world_pos: Point3<f32>,
        img_size: Vector2<u32>,
        fov_y: f32,
    ) -> PixelProjection {
        self.try_world_to_pixel(world_pos, img_size, fov_y)
            .unwrap_or(PixelProjection::UNPROJECTABLE)
    }

    fn update_camera(&mut self) {
        let camera = self.translation * self.rotation * self.center_translation;
        self.inv_camera = camera.inverse();
    }
}

fn inverse_size(window_size: Vector2<u32>) -> Vector2<f32> {
    window_size.map(|c| 1.0 / c as f32)
}

/// Project point in `<-1;1>` screen space onto the arcball sphere
pub fn screen_to_arcball(p: Vector2<f32>) -> UnitQuaternion<f32> {
    let dist = p.dot(&p);
    let q = if dist <= 1.0 {
        // on or inside the sphere
        Quaternion::new(0.0, p.x, p.y, f32::sqrt(1.0 - dist))
    } else {
        // outside, snap to the equator
        let unit_dir = p.normalize();
        Quaternion::new(0.0, unit_dir.x, unit_dir.y, 0.0)
    };
    UnitQuaternion::new_normalize(q)
}
