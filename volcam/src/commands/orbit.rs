use std::fmt::Write as _;

use anyhow::{Context, Result};
use nalgebra::vector;
use volcam_lib::{
    camera::{write_view_file, ArcballCamera, CameraPose},
    common::BoundBox,
    render::{FrameBuffer, Renderer},
    volumetric::{load_raw_volume, Volume},
};

use super::{camera_from_pose, create_out_dir, image_path, progress_bar, transfer_function};
use crate::config::{OrbitConfig, RenderConfig};

/// Append one line per box corner: `frame corner x y depth`.
/// `y` is measured from the top row, unprojectable corners are `-1 -1`.
fn annotate_corners(
    out: &mut String,
    frame: usize,
    arcball: &ArcballCamera,
    bounds: BoundBox,
    cfg: &RenderConfig,
) {
    let img_size = cfg.image_size();
    for (corner_id, corner) in bounds.into_iter().enumerate() {
        let line = match arcball.try_world_to_pixel(corner, img_size, cfg.fov_y) {
            Some(p) => {
                let y_top = img_size.y as f32 - p.pixel.y;
                format!("{frame} {corner_id} {} {y_top} {}", p.pixel.x, p.depth)
            }
            None => format!("{frame} {corner_id} -1 -1 {}", f32::NAN),
        };
        // Writing into String cannot fail
        let _ = writeln!(out, "{line}");
    }
}

pub fn run(cfg: OrbitConfig) -> Result<()> {
    let volume = load_raw_volume(&cfg.file, &cfg.format)?;
    let bounds = volume.get_bound_box();

    let mut arcball = ArcballCamera::new(bounds, cfg.render.image_size());
    arcball.pan(cfg.pan);
    arcball.zoom(cfg.zoom);

    create_out_dir(&cfg.out_dir)?;
    let tf = transfer_function(&cfg.render, volume.get_range())?;
    let renderer = Renderer::new(volume, tf, cfg.render.render_options);
    let (w, h) = cfg.render.render_options.resolution;
    let mut framebuffer = FrameBuffer::new(w, h);

    let mut poses: Vec<CameraPose> = Vec::with_capacity(cfg.frames);
    let mut annotations = String::new();

    let bar = progress_bar(cfg.frames as u64, "Orbiting");
    for frame in 0..cfg.frames {
        let pose = arcball.pose();
        let camera = camera_from_pose(&pose, &cfg.render);
        framebuffer.clear();
        renderer.render(&camera, &mut framebuffer);
        framebuffer.save(image_path(&cfg.out_dir, &format!("orbit_{frame:03}"), &cfg.render))?;

        annotate_corners(&mut annotations, frame, &arcball, bounds, &cfg.render);
        poses.push(pose);

        arcball.rotate(vector![0.0, 0.0], vector![cfg.drag, 0.0]);
        bar.inc(1);
    }
    bar.finish_with_message("Done");

    write_view_file(cfg.out_dir.join("orbit_views.txt"), &poses)?;
    let annotations_path = cfg.out_dir.join("annotations.txt");
    std::fs::write(&annotations_path, annotations)
        .with_context(|| format!("cannot write {}", annotations_path.display()))?;

    log::info!("Wrote {} frames to {}", cfg.frames, cfg.out_dir.display());
    Ok(())
}
