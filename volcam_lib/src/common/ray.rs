use nalgebra::{vector, Point3, Translation3, Vector3};

use super::BoundBox;

/// Ray cast by camera.
/// Main usecase is getting intersections with volumes ([`BoundBox::intersect`]),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` must be unit vector.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray { origin, direction }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }

    /// Transform ray from world coordinates into voxel coordinates.
    ///
    /// Origin of the returned ray is the point `t` units along this ray.
    /// The direction is scaled, so that stepping the returned ray by `s`
    /// corresponds to `s` world units.
    ///
    /// # Params
    /// * `bound_box` - Bounding box of volume
    /// * `spacing` - Shape of cells in volume
    /// * `t` - Ray parameter of the new origin, usually the entry point into `bound_box`
    pub fn transform_to_volume_space(
        &self,
        bound_box: BoundBox,
        spacing: Vector3<f32>,
        t: f32,
    ) -> Ray {
        let spacing_inv = vector![1.0, 1.0, 1.0].component_div(&spacing);
        let to_lower = Translation3::from(-bound_box.lower.coords);

        let origin = to_lower.transform_point(&self.point_from_t(t));
        let origin = Point3::from(origin.coords.component_mul(&spacing_inv));
        let direction = self.direction.component_mul(&spacing_inv);
        Ray { origin, direction }
    }
}
