pub use nalgebra::{point, vector, Point3, Vector3};
pub use volcam_lib::{
    camera::{ArcballCamera, PerspectiveCamera},
    common::BoundBox,
    render::{FrameBuffer, RenderOptions, Renderer},
    test_helpers,
    transfer_function::{ColorMap, TransferFunction},
    volumetric::{LinearVolume, Volume},
};

pub const WIDTH: usize = 256;
pub const HEIGHT: usize = 256;
pub const SPHERE_SIDE: usize = 64;

pub const POSITION: Point3<f32> = point![100.0, 100.0, 100.0];
pub const DIRECTION: Vector3<f32> = vector![-1.0, -1.0, -1.0];
pub const UP: Vector3<f32> = vector![0.0, 1.0, 0.0];

pub fn sphere_renderer(render_options: RenderOptions) -> Renderer<LinearVolume> {
    let volume = test_helpers::sphere_volume(SPHERE_SIDE);
    let tf = TransferFunction::new(ColorMap::Jet, volume.get_range());
    Renderer::new(volume, tf, render_options)
}
