use crate::common::{BoundBox, Ray, ValueRange};

use nalgebra::{vector, Point3, Vector3};

// Volume assumes f32 data
// Volume is axis aligned
pub trait Volume: Sync {
    // get data dimensions
    fn get_size(&self) -> Vector3<usize>;

    // Volume position and extent in world coordinates
    fn get_bound_box(&self) -> BoundBox;

    // Shape of a cell
    fn get_spacing(&self) -> Vector3<f32>;

    // Lowest and highest sample
    fn get_range(&self) -> ValueRange;

    // trilinear interpolation sample, zero if outside
    // pos in volume coordinates
    fn sample_at(&self, pos: Point3<f32>) -> f32;

    // sample and forward difference gradient (backward at the upper border)
    // pos in volume coordinates
    fn sample_at_gradient(&self, pos: Point3<f32>) -> (f32, Vector3<f32>) {
        let sample = self.sample_at(pos);
        let mut grad_dir = vector![0.5, 0.5, 0.5];

        let size = self.get_size().map(|v| v as f32 - 1.0);

        if pos.x + grad_dir.x > size.x {
            grad_dir.x *= -1.0;
        }

        if pos.y + grad_dir.y > size.y {
            grad_dir.y *= -1.0;
        }

        if pos.z + grad_dir.z > size.z {
            grad_dir.z *= -1.0;
        }

        let sample_x = self.sample_at(pos + vector![grad_dir.x, 0.0, 0.0]);
        let sample_y = self.sample_at(pos + vector![0.0, grad_dir.y, 0.0]);
        let sample_z = self.sample_at(pos + vector![0.0, 0.0, grad_dir.z]);
        let gradient = (vector![sample_x, sample_y, sample_z] - vector![sample, sample, sample])
            .component_div(&grad_dir);

        (sample, gradient)
    }

    // Voxel value, None if outside
    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32>;

    fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        self.get_bound_box().intersect(ray)
    }
}
