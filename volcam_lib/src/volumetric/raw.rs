use std::fs::File;
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use memmap::MmapOptions;
use nalgebra::{vector, Vector3};

use crate::error::{Result, VolcamError};

use super::linear_volume::voxel_count;
use super::{Endianness, LinearVolume, Volume, VoxelType};

/// Layout of a headerless volume file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFormat {
    /// Samples along each axis
    pub dims: Vector3<usize>,
    pub voxel_type: VoxelType,
    pub endianness: Endianness,
    /// Shape of a cell
    pub spacing: Vector3<f32>,
}

impl RawFormat {
    pub fn new(dims: Vector3<usize>, voxel_type: VoxelType) -> RawFormat {
        RawFormat {
            dims,
            voxel_type,
            endianness: Endianness::Little,
            spacing: vector![1.0, 1.0, 1.0],
        }
    }

    /// `None` on overflow
    pub fn n_voxels(&self) -> Option<usize> {
        voxel_count(self.dims)
    }

    /// Bytes needed for the whole volume, `None` on overflow
    pub fn byte_len(&self) -> Option<usize> {
        self.n_voxels()?.checked_mul(self.voxel_type.size())
    }
}

/// Load volume from a raw file.
/// Samples are converted to `f32`.
///
/// # Errors
/// * file cannot be opened or mapped
/// * `format.dims` has a zero component
/// * `format.byte_len()` overflows
/// * file is shorter than `format.byte_len()`
pub fn load_raw_volume<P>(path: P, format: &RawFormat) -> Result<LinearVolume>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let dims = format.dims;
    let too_large = || VolcamError::TooLarge(dims.x, dims.y, dims.z);
    if format.n_voxels().ok_or_else(too_large)? == 0 {
        return Err(VolcamError::EmptyVolume(dims.x, dims.y, dims.z));
    }
    let expected = format.byte_len().ok_or_else(too_large)?;

    let file = File::open(path).map_err(|e| VolcamError::io(path, e))?;
    let file_len = file.metadata().map_err(|e| VolcamError::io(path, e))?.len() as usize;

    if file_len < expected {
        return Err(VolcamError::SizeMismatch {
            path: path.to_owned(),
            expected,
            actual: file_len,
        });
    }
    if file_len > expected {
        log::warn!(
            "{} holds {} bytes, using the first {}",
            path.display(),
            file_len,
            expected
        );
    }

    let mmap = unsafe { MmapOptions::new().len(expected).map(&file) }
        .map_err(|e| VolcamError::io(path, e))?;

    let bytes = &mmap[..expected];
    let data = match format.endianness {
        Endianness::Little => convert_samples::<LittleEndian>(bytes, format.voxel_type),
        Endianness::Big => convert_samples::<BigEndian>(bytes, format.voxel_type),
    };

    let volume = LinearVolume::new(dims, format.spacing, data)?;
    log::info!(
        "Loaded {} ({}x{}x{} {}), range {}",
        path.display(),
        dims.x,
        dims.y,
        dims.z,
        format.voxel_type,
        volume.get_range()
    );
    Ok(volume)
}

fn convert_samples<B: ByteOrder>(bytes: &[u8], voxel_type: VoxelType) -> Vec<f32> {
    let n = bytes.len() / voxel_type.size();
    match voxel_type {
        VoxelType::U8 => bytes.iter().map(|&v| v as f32).collect(),
        VoxelType::U16 => {
            let mut buf = vec![0; n];
            B::read_u16_into(bytes, &mut buf);
            buf.into_iter().map(|v| v as f32).collect()
        }
        VoxelType::F32 => {
            let mut buf = vec![0.0; n];
            B::read_f32_into(bytes, &mut buf);
            buf
        }
        VoxelType::F64 => {
            let mut buf = vec![0.0; n];
            B::read_f64_into(bytes, &mut buf);
            buf.into_iter().map(|v| v as f32).collect()
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::test_helpers::TempFile;

    fn write_f32(samples: &[f32], endianness: Endianness) -> Vec<u8> {
        let mut bytes = vec![0; samples.len() * 4];
        match endianness {
            Endianness::Little => LittleEndian::write_f32_into(samples, &mut bytes),
            Endianness::Big => BigEndian::write_f32_into(samples, &mut bytes),
        }
        bytes
    }

    #[test]
    fn load_u8() {
        let file = TempFile::with_bytes("u8.raw", &[0, 10, 20, 30, 40, 50, 60, 70]);
        let format = RawFormat::new(vector![2, 2, 2], VoxelType::U8);

        let vol = load_raw_volume(file.path(), &format).unwrap();
        assert_eq!(vol.get_size(), vector![2, 2, 2]);
        assert_eq!(vol.get_data(1, 1, 1), Some(70.0));
        assert_eq!(vol.get_range().low, 0.0);
        assert_eq!(vol.get_range().high, 70.0);
    }

    #[test]
    fn load_u16_big_endian() {
        let file = TempFile::with_bytes("u16.raw", &[0x01, 0x00, 0x00, 0x02]);
        let mut format = RawFormat::new(vector![2, 1, 1], VoxelType::U16);
        format.endianness = Endianness::Big;

        let vol = load_raw_volume(file.path(), &format).unwrap();
        assert_eq!(vol.get_data(0, 0, 0), Some(256.0));
        assert_eq!(vol.get_data(1, 0, 0), Some(2.0));
    }

    #[test]
    fn load_f32_both_orders() {
        let samples = [-1.5, 0.25, 3.0, 1e6];
        for endianness in [Endianness::Little, Endianness::Big] {
            let file = TempFile::with_bytes("f32.raw", &write_f32(&samples, endianness));
            let mut format = RawFormat::new(vector![4, 1, 1], VoxelType::F32);
            format.endianness = endianness;

            let vol = load_raw_volume(file.path(), &format).unwrap();
            assert_eq!(vol.data(), &samples);
            assert_eq!(vol.get_range().low, -1.5);
            assert_eq!(vol.get_range().high, 1e6);
        }
    }

    #[test]
    fn load_f64_keeps_fraction() {
        let mut bytes = vec![0; 16];
        LittleEndian::write_f64_into(&[0.75, -300.5], &mut bytes);
        let file = TempFile::with_bytes("f64.raw", &bytes);
        let format = RawFormat::new(vector![1, 2, 1], VoxelType::F64);

        let vol = load_raw_volume(file.path(), &format).unwrap();
        assert_eq!(vol.data(), &[0.75, -300.5]);
    }

    #[test]
    fn spacing_scales_bound_box() {
        let file = TempFile::with_bytes("spacing.raw", &[0; 27]);
        let mut format = RawFormat::new(vector![3, 3, 3], VoxelType::U8);
        format.spacing = vector![1.0, 2.0, 0.5];

        let vol = load_raw_volume(file.path(), &format).unwrap();
        let bbox = vol.get_bound_box();
        assert_eq!(bbox.size(), vector![2.0, 4.0, 1.0]);
        assert_eq!(bbox.center(), nalgebra::point![0.0, 0.0, 0.0]);
    }

    #[test]
    fn short_file_is_error() {
        let file = TempFile::with_bytes("short.raw", &[0; 7]);
        let format = RawFormat::new(vector![2, 2, 2], VoxelType::U8);

        let err = load_raw_volume(file.path(), &format).unwrap_err();
        assert!(matches!(
            err,
            VolcamError::SizeMismatch {
                expected: 8,
                actual: 7,
                ..
            }
        ));
    }

    #[test]
    fn long_file_uses_prefix() {
        let file = TempFile::with_bytes("long.raw", &[1, 2, 3, 4, 5, 6]);
        let format = RawFormat::new(vector![2, 2, 1], VoxelType::U8);

        let vol = load_raw_volume(file.path(), &format).unwrap();
        assert_eq!(vol.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_dims_is_error() {
        let file = TempFile::with_bytes("zero.raw", &[0; 4]);
        let format = RawFormat::new(vector![2, 0, 2], VoxelType::U8);

        let err = load_raw_volume(file.path(), &format).unwrap_err();
        assert!(matches!(err, VolcamError::EmptyVolume(2, 0, 2)));
    }

    #[test]
    fn huge_dims_is_error() {
        let file = TempFile::with_bytes("huge.raw", &[0; 16]);
        let side = u32::MAX as usize;
        let format = RawFormat::new(vector![side, side, side], VoxelType::F32);
        assert_eq!(format.byte_len(), None);

        let err = load_raw_volume(file.path(), &format).unwrap_err();
        assert!(matches!(err, VolcamError::TooLarge(..)));

        // voxel count fits, byte count does not
        let format = RawFormat::new(vector![usize::MAX / 2, 1, 1], VoxelType::F64);
        assert!(format.n_voxels().is_some());
        let err = load_raw_volume(file.path(), &format).unwrap_err();
        assert!(matches!(err, VolcamError::TooLarge(..)));
    }

    #[test]
    fn missing_file() {
        let format = RawFormat::new(vector![2, 2, 2], VoxelType::U8);
        let err = load_raw_volume("/nonexistent/volume.raw", &format).unwrap_err();
        assert!(matches!(err, VolcamError::Io { .. }));
    }
}
