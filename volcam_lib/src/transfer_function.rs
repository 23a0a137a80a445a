//! Piecewise linear transfer functions.
//! Colors and opacities are two independent lists of control points spread evenly over the value range.

use std::path::Path;

use nalgebra::{vector, Vector3};

use crate::color::{self, RGBA};
use crate::common::ValueRange;
use crate::error::{Result, VolcamError};
use crate::parse::parse_float_rows;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    Jet,
    Rgb,
    Grayscale,
}

impl ColorMap {
    pub const NAMES: &'static [&'static str] = &["jet", "rgb", "grayscale"];

    /// Unknown names fall back to grayscale
    pub fn from_name(name: &str) -> ColorMap {
        match name {
            "jet" => ColorMap::Jet,
            "rgb" => ColorMap::Rgb,
            "grayscale" | "gray" => ColorMap::Grayscale,
            _ => {
                log::warn!("Unknown color map `{name}`, using grayscale");
                ColorMap::Grayscale
            }
        }
    }

    /// Control colors, from the lowest value to the highest
    pub fn colors(&self) -> Vec<Vector3<f32>> {
        match self {
            ColorMap::Jet => vec![
                vector![0.0, 0.0, 0.562493],
                vector![0.0, 0.0, 1.0],
                vector![0.0, 1.0, 1.0],
                vector![0.500008, 1.0, 0.500008],
                vector![1.0, 1.0, 0.0],
                vector![1.0, 0.0, 0.0],
                vector![0.500008, 0.0, 0.0],
            ],
            ColorMap::Rgb => vec![
                vector![0.0, 0.0, 1.0],
                vector![0.0, 1.0, 0.0],
                vector![1.0, 0.0, 0.0],
            ],
            ColorMap::Grayscale => vec![vector![0.0, 0.0, 0.0], vector![1.0, 1.0, 1.0]],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    colors: Vec<Vector3<f32>>,
    opacities: Vec<f32>,
    range: ValueRange,
}

impl TransferFunction {
    /// Transfer function with linear opacity ramp over `range`
    pub fn new(color_map: ColorMap, range: ValueRange) -> TransferFunction {
        TransferFunction {
            colors: color_map.colors(),
            opacities: vec![0.0, 1.0],
            range,
        }
    }

    /// Replace opacity control points, values are clamped to `<0;1>`.
    /// Empty list keeps the current opacities.
    pub fn with_opacities(mut self, opacities: Vec<f32>) -> TransferFunction {
        if opacities.is_empty() {
            log::warn!("Empty opacity list ignored");
            return self;
        }
        self.opacities = opacities.into_iter().map(|a| a.clamp(0.0, 1.0)).collect();
        self
    }

    /// Replace color control points.
    /// Empty list keeps the current colors.
    pub fn with_colors(mut self, colors: Vec<Vector3<f32>>) -> TransferFunction {
        if colors.is_empty() {
            log::warn!("Empty color list ignored");
            return self;
        }
        self.colors = colors;
        self
    }

    /// Build transfer function from a color map, optionally overriding
    /// colors and opacities with the contents of text files.
    pub fn from_files(
        color_map: ColorMap,
        range: ValueRange,
        color_file: Option<&Path>,
        opacity_file: Option<&Path>,
    ) -> Result<TransferFunction> {
        let mut tf = TransferFunction::new(color_map, range);
        if let Some(path) = color_file {
            tf = tf.with_colors(read_color_file(path)?);
        }
        if let Some(path) = opacity_file {
            tf = tf.with_opacities(read_opacity_file(path)?);
        }
        Ok(tf)
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    pub fn set_range(&mut self, range: ValueRange) {
        self.range = range;
    }

    pub fn colors(&self) -> &[Vector3<f32>] {
        &self.colors
    }

    pub fn opacities(&self) -> &[f32] {
        &self.opacities
    }

    /// Color and opacity of `value`, channels in `<0;1>`
    pub fn sample(&self, value: f32) -> RGBA {
        let t = self.range.normalize(value);
        let rgb = interpolate(&self.colors, t);
        let opacity = interpolate(&self.opacities, t);
        color::new(rgb.x, rgb.y, rgb.z, opacity)
    }
}

// `t` in <0;1>, control points spread evenly
fn interpolate<T>(points: &[T], t: f32) -> T
where
    T: Copy + std::ops::Mul<f32, Output = T> + std::ops::Add<Output = T>,
{
    if points.len() == 1 {
        return points[0];
    }

    let pos = t * (points.len() - 1) as f32;
    let i = usize::min(pos as usize, points.len() - 2);
    let frac = pos - i as f32;
    points[i] * (1.0 - frac) + points[i + 1] * frac
}

/// Read opacity control points, one number per line
pub fn read_opacity_file(path: &Path) -> Result<Vec<f32>> {
    let text = std::fs::read_to_string(path).map_err(|e| VolcamError::io(path, e))?;
    let rows = parse_float_rows::<1>(&text).map_err(|source| VolcamError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(rows.into_iter().map(|[a]| a).collect())
}

/// Read color control points, `r g b` per line in `<0;1>`
pub fn read_color_file(path: &Path) -> Result<Vec<Vector3<f32>>> {
    let text = std::fs::read_to_string(path).map_err(|e| VolcamError::io(path, e))?;
    let rows = parse_float_rows::<3>(&text).map_err(|source| VolcamError::Parse {
        path: path.to_owned(),
        source,
    })?;
    Ok(rows.into_iter().map(Vector3::from).collect())
}
