//! Volume rendering of raw voxel data sets from interactive or precomputed cameras.
//!
//! [`camera::ArcballCamera`] turns mouse input into camera poses and projects world points
//! back to pixels, [`render::Renderer`] ray marches a [`volumetric::Volume`] into a
//! [`render::FrameBuffer`].

pub mod camera;
pub mod color;
pub mod common;
pub mod error;
mod parse;
pub mod render;
pub mod test_helpers;
pub mod transfer_function;
pub mod volumetric;

pub use error::{Result, VolcamError};
pub use parse::LineError;

use std::path::Path;

use camera::{CameraPose, PerspectiveCamera};
use render::{FrameBuffer, RenderOptions, Renderer};
use transfer_function::TransferFunction;
use volumetric::{load_raw_volume, RawFormat};

/// Load a raw volume and render it from every camera in `cameras`,
/// `fov_y` is the vertical field of view in degrees.
pub fn render_views<P>(
    path: P,
    format: &RawFormat,
    tf: TransferFunction,
    render_options: RenderOptions,
    cameras: &[CameraPose],
    fov_y: f32,
) -> Result<Vec<FrameBuffer>>
where
    P: AsRef<Path>,
{
    let volume = load_raw_volume(path, format)?;
    let renderer = Renderer::new(volume, tf, render_options);
    let (w, h) = render_options.resolution;

    let frames = cameras
        .iter()
        .map(|pose| {
            let mut camera = PerspectiveCamera::from_pose(pose);
            camera.change_fov(fov_y);
            let mut framebuffer = FrameBuffer::new(w, h);
            renderer.render(&camera, &mut framebuffer);
            framebuffer
        })
        .collect();
    Ok(frames)
}
