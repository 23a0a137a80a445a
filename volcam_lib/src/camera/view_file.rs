//! View files, one camera per line:
//! `px py pz dx dy dz ux uy uz`

use std::fmt::Write as _;
use std::path::Path;

use nalgebra::{point, vector};

use crate::error::{Result, VolcamError};
use crate::parse::{parse_float_rows, LineError};

use super::CameraPose;

/// Parse cameras from view file contents
pub fn parse_views(text: &str) -> std::result::Result<Vec<CameraPose>, LineError> {
    let rows = parse_float_rows::<9>(text)?;

    let cameras = rows
        .into_iter()
        .map(|[px, py, pz, dx, dy, dz, ux, uy, uz]| {
            CameraPose::new(point![px, py, pz], vector![dx, dy, dz], vector![ux, uy, uz])
        })
        .collect();
    Ok(cameras)
}

/// Serialize cameras, the output can be read back by [`parse_views`]
pub fn format_views(cameras: &[CameraPose]) -> String {
    let mut out = String::new();
    for cam in cameras {
        let (p, d, u) = (cam.position, cam.direction, cam.up);
        // Writing into String cannot fail
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {} {} {}",
            p.x, p.y, p.z, d.x, d.y, d.z, u.x, u.y, u.z
        );
    }
    out
}

pub fn read_view_file<P>(path: P) -> Result<Vec<CameraPose>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| VolcamError::io(path, e))?;
    let cameras = parse_views(&text).map_err(|source| VolcamError::Parse {
        path: path.to_owned(),
        source,
    })?;
    log::info!("Read {} cameras from {}", cameras.len(), path.display());
    Ok(cameras)
}

pub fn write_view_file<P>(path: P, cameras: &[CameraPose]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    std::fs::write(path, format_views(cameras)).map_err(|e| VolcamError::io(path, e))
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::camera::orbit_cameras;
    use crate::common::BoundBox;

    #[test]
    fn parse_two_cameras() {
        let text = "0 0 -90 0 0 1 0 1 0\n\n1.5 2 3 -1 0 0 0 -1 0\n";
        let cameras = parse_views(text).unwrap();

        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].position, point![0.0, 0.0, -90.0]);
        assert_eq!(cameras[0].direction, vector![0.0, 0.0, 1.0]);
        assert_eq!(cameras[1].position, point![1.5, 2.0, 3.0]);
        assert_eq!(cameras[1].up, vector![0.0, -1.0, 0.0]);
    }

    #[test]
    fn short_line_is_error() {
        let text = "0 0 -90 0 0 1 0 1 0\n1 2 3\n";
        let err = parse_views(text).unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn formatted_views_read_back() {
        let bounds = BoundBox::centered(vector![64.0, 32.0, 16.0]);
        let cameras = orbit_cameras(7, &bounds, 0.5);

        let parsed = parse_views(&format_views(&cameras)).unwrap();
        assert_eq!(parsed, cameras);
    }

    #[test]
    fn missing_file() {
        let err = read_view_file("/nonexistent/views.txt").unwrap_err();
        assert!(matches!(err, VolcamError::Io { .. }));
    }
}
