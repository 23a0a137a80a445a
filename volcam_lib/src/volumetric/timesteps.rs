//! Time-varying data sets, one raw file per timestep.
//! The timestep number is taken from the file name, `vortex_0042.raw` is timestep 42.

use std::path::{Path, PathBuf};

use crate::common::ValueRange;
use crate::error::{Result, VolcamError};

use super::{load_raw_volume, RawFormat, Volume};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestep {
    pub index: u32,
    pub path: PathBuf,
}

/// Parse timestep number from the last run of digits in the file stem
pub fn timestep_from_file_name(path: &Path) -> Result<u32> {
    let missing = || VolcamError::MissingTimestep(path.to_owned());

    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(missing)?;
    let end = stem.rfind(|c: char| c.is_ascii_digit()).ok_or_else(missing)? + 1;
    let start = stem[..end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);

    stem[start..end].parse().map_err(|_| missing())
}

/// List timesteps of all `dirs`, sorted by timestep number and path.
/// Hidden files and files without a number in their name are skipped.
pub fn scan_timesteps<P>(dirs: &[P]) -> Result<Vec<Timestep>>
where
    P: AsRef<Path>,
{
    let mut timesteps = vec![];

    for dir in dirs {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| VolcamError::io(dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| VolcamError::io(dir, e))?;
            let path = entry.path();

            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if hidden || !path.is_file() {
                continue;
            }

            match timestep_from_file_name(&path) {
                Ok(index) => timesteps.push(Timestep { index, path }),
                Err(e) => log::warn!("Skipping file: {e}"),
            }
        }
    }

    timesteps.sort();
    log::debug!("Found {} timesteps", timesteps.len());
    Ok(timesteps)
}

/// Keep timesteps whose number is divisible by `stride`.
/// Stride 0 is treated as 1.
pub fn every_nth(timesteps: &[Timestep], stride: u32) -> Vec<Timestep> {
    let stride = stride.max(1);
    timesteps
        .iter()
        .filter(|ts| ts.index % stride == 0)
        .cloned()
        .collect()
}

/// Union of value ranges of all volumes.
/// Volumes are loaded one at a time.
pub fn global_range<I, P>(paths: I, format: &RawFormat) -> Result<ValueRange>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut range = ValueRange::empty();
    for path in paths {
        let volume = load_raw_volume(path, format)?;
        range = range.union(&volume.get_range());
    }
    Ok(range)
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;
    use crate::test_helpers::{TempDir, TempFile};
    use crate::volumetric::VoxelType;

    #[test]
    fn number_from_name() {
        let cases = [
            ("data/vortex_0042.raw", 42),
            ("t7", 7),
            ("run2_step15.dat", 15),
            ("/a/b/0.raw", 0),
            ("abc12def.raw", 12),
        ];
        for (name, expected) in cases {
            assert_eq!(timestep_from_file_name(Path::new(name)).unwrap(), expected);
        }
    }

    #[test]
    fn name_without_number() {
        let err = timestep_from_file_name(Path::new("dir9/volume.raw")).unwrap_err();
        assert!(matches!(err, VolcamError::MissingTimestep(_)));
    }

    #[test]
    fn scan_sorts_and_skips() {
        let dir = TempDir::new("scan");
        for name in ["ts_10.raw", "ts_2.raw", "ts_1.raw", "notes.txt", ".hidden_3"] {
            dir.write(name, &[0]);
        }
        std::fs::create_dir(dir.path().join("sub_5")).unwrap();

        let timesteps = scan_timesteps(&[dir.path()]).unwrap();
        let indices: Vec<u32> = timesteps.iter().map(|ts| ts.index).collect();
        assert_eq!(indices, vec![1, 2, 10]);
        assert!(timesteps[2].path.ends_with("ts_10.raw"));
    }

    #[test]
    fn scan_missing_dir() {
        let err = scan_timesteps(&["/nonexistent/timesteps"]).unwrap_err();
        assert!(matches!(err, VolcamError::Io { .. }));
    }

    #[test]
    fn stride() {
        let timesteps: Vec<Timestep> = (0..10)
            .map(|index| Timestep {
                index,
                path: PathBuf::from(format!("t{index}")),
            })
            .collect();

        let kept: Vec<u32> = every_nth(&timesteps, 3).iter().map(|ts| ts.index).collect();
        assert_eq!(kept, vec![0, 3, 6, 9]);
        assert_eq!(every_nth(&timesteps, 0).len(), 10);
    }

    #[test]
    fn range_over_files() {
        let a = TempFile::with_bytes("range_a.raw", &[5, 10]);
        let b = TempFile::with_bytes("range_b.raw", &[2, 7]);
        let format = RawFormat::new(vector![2, 1, 1], VoxelType::U8);

        let range = global_range([a.path(), b.path()], &format).unwrap();
        assert_eq!(range, ValueRange::from(2.0..10.0));

        let none: [&Path; 0] = [];
        assert!(global_range(none, &format).unwrap().is_empty());
    }
}
