//! Module with helper functions
//! Saves repetition in unit tests, integration tests and benchmarks

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::{vector, Vector3};

use crate::volumetric::LinearVolume;

/// 2x2x2 volume with voxels 100 units wide, samples grow along every axis
pub fn white_volume() -> LinearVolume {
    let data = vec![0.0, 32.0, 64.0, 96.0, 128.0, 160.0, 192.0, 255.0];
    LinearVolume::new(vector![2, 2, 2], vector![100.0, 100.0, 100.0], data).unwrap()
}

/// Volume of zeros with unit spacing
pub fn empty_volume(size: Vector3<usize>) -> LinearVolume {
    filled_volume(size, 0.0)
}

/// Volume with every sample equal to `value`, unit spacing
pub fn filled_volume(size: Vector3<usize>, value: f32) -> LinearVolume {
    let data = vec![value; size.x * size.y * size.z];
    LinearVolume::new(size, vector![1.0, 1.0, 1.0], data).unwrap()
}

/// Sphere of density 1 falling off to 0 at the border, unit spacing
pub fn sphere_volume(side: usize) -> LinearVolume {
    let center = (side as f32 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(side * side * side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let d = vector![x as f32, y as f32, z as f32] - vector![center, center, center];
                data.push(f32::max(1.0 - d.norm() / center, 0.0));
            }
        }
    }
    LinearVolume::new(vector![side, side, side], vector![1.0, 1.0, 1.0], data).unwrap()
}

fn unique_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("volcam_{}_{}_{}", std::process::id(), n, name))
}

/// File in the temp directory, removed on drop
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn with_bytes(name: &str, bytes: &[u8]) -> TempFile {
        let path = unique_path(name);
        std::fs::write(&path, bytes).unwrap();
        TempFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Directory in the temp directory, removed with its content on drop
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(name: &str) -> TempDir {
        let path = unique_path(name);
        std::fs::create_dir_all(&path).unwrap();
        TempDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create file `name` inside the directory
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.path.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
