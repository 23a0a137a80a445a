use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use volcam_lib::{
    camera::read_view_file,
    render::{FrameBuffer, Renderer},
    volumetric::{every_nth, global_range, load_raw_volume, scan_timesteps},
};

use super::{camera_from_pose, create_out_dir, image_path, progress_bar, transfer_function};
use crate::config::{Input, RenderCommandConfig};

/// Volume file with its timestep number, `None` for a single file
struct Job {
    timestep: Option<u32>,
    path: PathBuf,
}

fn collect_jobs(input: &Input) -> Result<Vec<Job>> {
    let jobs = match input {
        Input::File(path) => vec![Job {
            timestep: None,
            path: path.clone(),
        }],
        Input::Timesteps { dirs, stride } => {
            let timesteps = scan_timesteps(dirs)?;
            every_nth(&timesteps, *stride)
                .into_iter()
                .map(|ts| Job {
                    timestep: Some(ts.index),
                    path: ts.path,
                })
                .collect()
        }
    };
    Ok(jobs)
}

fn image_stem(timestep: Option<u32>, camera: usize) -> String {
    match timestep {
        Some(t) => format!("volume_ts{t}_cam{camera}"),
        None => format!("volume_cam{camera}"),
    }
}

pub fn run(cfg: RenderCommandConfig) -> Result<()> {
    let cameras = read_view_file(&cfg.view)?;
    let jobs = collect_jobs(&cfg.input)?;
    if jobs.is_empty() {
        bail!("no volumes to render");
    }
    if cameras.is_empty() {
        bail!("no cameras in {}", cfg.view.display());
    }

    let range = match cfg.range {
        Some(range) => range,
        None => global_range(jobs.iter().map(|job| &job.path), &cfg.format)
            .context("cannot compute global value range")?,
    };
    log::info!("Transfer function range {range}");

    create_out_dir(&cfg.out_dir)?;
    let tf = transfer_function(&cfg.render, range)?;
    let (w, h) = cfg.render.render_options.resolution;
    let mut framebuffer = FrameBuffer::new(w, h);
    let first = load_raw_volume(&jobs[0].path, &cfg.format)?;
    let mut renderer = Renderer::new(first, tf, cfg.render.render_options);

    let bar = progress_bar((jobs.len() * cameras.len()) as u64, "Rendering");
    for (n, job) in jobs.iter().enumerate() {
        if n > 0 {
            renderer.set_volume(load_raw_volume(&job.path, &cfg.format)?);
        }

        for (i, pose) in cameras.iter().enumerate() {
            let camera = camera_from_pose(pose, &cfg.render);
            framebuffer.clear();
            renderer.render(&camera, &mut framebuffer);

            let path = image_path(&cfg.out_dir, &image_stem(job.timestep, i), &cfg.render);
            framebuffer.save(&path)?;
            bar.inc(1);
        }
    }
    bar.finish_with_message("Done");
    Ok(())
}
