use nalgebra::{Point3, Vector3};

use crate::common::{BoundBox, ValueRange};
use crate::error::{Result, VolcamError};

use super::Volume;

/// Dense volume, samples stored in one buffer with x being the fastest growing axis.
/// The volume is centered in the origin of world coordinates.
pub struct LinearVolume {
    bound_box: BoundBox, // lower and upper point in world coordinates
    size: Vector3<usize>,
    spacing: Vector3<f32>,
    range: ValueRange,
    data: Vec<f32>,
}

impl std::fmt::Debug for LinearVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinearVolume")
            .field("box", &self.bound_box)
            .field("size", &self.size)
            .field("spacing", &self.spacing)
            .field("range", &self.range)
            .field("data len", &self.data.len())
            .finish()
    }
}

/// `size.x * size.y * size.z`, `None` on overflow
pub(crate) fn voxel_count(size: Vector3<usize>) -> Option<usize> {
    size.x.checked_mul(size.y)?.checked_mul(size.z)
}

impl LinearVolume {
    /// Build volume from samples
    ///
    /// # Params
    /// * `size` - Number of samples along each axis
    /// * `spacing` - Distance between neighbouring samples in world units
    /// * `data` - `size.x * size.y * size.z` samples, x-fastest order
    pub fn new(size: Vector3<usize>, spacing: Vector3<f32>, data: Vec<f32>) -> Result<LinearVolume> {
        let n_voxels = voxel_count(size).ok_or(VolcamError::TooLarge(size.x, size.y, size.z))?;
        if n_voxels == 0 {
            return Err(VolcamError::EmptyVolume(size.x, size.y, size.z));
        }
        if data.len() != n_voxels {
            return Err(VolcamError::SampleCount {
                expected: n_voxels,
                actual: data.len(),
            });
        }

        let range = ValueRange::from_samples(data.iter().copied());
        let vol_dims = size.map(|v| (v - 1) as f32).component_mul(&spacing);
        let bound_box = BoundBox::centered(vol_dims);

        Ok(LinearVolume {
            bound_box,
            size,
            spacing,
            range,
            data,
        })
    }

    fn get_3d_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + y * self.size.x + z * self.size.x * self.size.y
    }

    /// Number of samples
    pub fn n_voxels(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }
}

impl Volume for LinearVolume {
    fn get_size(&self) -> Vector3<usize> {
        self.size
    }

    fn get_bound_box(&self) -> BoundBox {
        self.bound_box
    }

    fn get_spacing(&self) -> Vector3<f32> {
        self.spacing
    }

    fn get_range(&self) -> ValueRange {
        self.range
    }

    fn sample_at(&self, pos: Point3<f32>) -> f32 {
        let upper = self.size.map(|v| (v - 1) as f32);
        let inside = pos.x >= 0.0
            && pos.y >= 0.0
            && pos.z >= 0.0
            && pos.x <= upper.x
            && pos.y <= upper.y
            && pos.z <= upper.z;
        if !inside {
            return 0.0;
        }

        let x0 = pos.x as usize;
        let y0 = pos.y as usize;
        let z0 = pos.z as usize;

        let x1 = usize::min(x0 + 1, self.size.x - 1);
        let y1 = usize::min(y0 + 1, self.size.y - 1);
        let z1 = usize::min(z0 + 1, self.size.z - 1);

        let x_t = pos.x - x0 as f32;
        let y_t = pos.y - y0 as f32;
        let z_t = pos.z - z0 as f32;

        let s = |x, y, z| self.data[self.get_3d_index(x, y, z)];

        // x lines
        let c00 = s(x0, y0, z0) * (1.0 - x_t) + s(x1, y0, z0) * x_t;
        let c10 = s(x0, y1, z0) * (1.0 - x_t) + s(x1, y1, z0) * x_t;
        let c01 = s(x0, y0, z1) * (1.0 - x_t) + s(x1, y0, z1) * x_t;
        let c11 = s(x0, y1, z1) * (1.0 - x_t) + s(x1, y1, z1) * x_t;

        // y plane
        let c0 = c00 * (1.0 - y_t) + c10 * y_t;
        let c1 = c01 * (1.0 - y_t) + c11 * y_t;

        c0 * (1.0 - z_t) + c1 * z_t
    }

    fn get_data(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        self.data.get(self.get_3d_index(x, y, z)).copied()
    }
}
