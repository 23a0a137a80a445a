use anyhow::Result;
use volcam_lib::{
    camera::{orbit_cameras, write_view_file},
    render::{FrameBuffer, Renderer},
    volumetric::{load_raw_volume, Volume},
};

use super::{camera_from_pose, create_out_dir, image_path, progress_bar, transfer_function};
use crate::config::CamerasConfig;

pub fn run(cfg: CamerasConfig) -> Result<()> {
    let volume = load_raw_volume(&cfg.file, &cfg.format)?;
    let cameras = orbit_cameras(cfg.n_samples, &volume.get_bound_box(), cfg.orbit_scale);

    write_view_file(&cfg.view, &cameras)?;
    log::info!("Wrote {} cameras to {}", cameras.len(), cfg.view.display());

    let out_dir = match &cfg.out_dir {
        Some(dir) => dir,
        None => return Ok(()),
    };
    create_out_dir(out_dir)?;

    let tf = transfer_function(&cfg.render, volume.get_range())?;
    let renderer = Renderer::new(volume, tf, cfg.render.render_options);
    let (w, h) = cfg.render.render_options.resolution;
    let mut framebuffer = FrameBuffer::new(w, h);

    let bar = progress_bar(cameras.len() as u64, "Rendering");
    for (i, pose) in cameras.iter().enumerate() {
        let camera = camera_from_pose(pose, &cfg.render);
        framebuffer.clear();
        renderer.render(&camera, &mut framebuffer);
        framebuffer.save(image_path(out_dir, &format!("volume{}", i + 1), &cfg.render))?;
        bar.inc(1);
    }
    bar.finish_with_message("Done");
    Ok(())
}
