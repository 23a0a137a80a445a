//! Implementation of subcommands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use volcam_lib::{
    camera::{CameraPose, PerspectiveCamera},
    common::ValueRange,
    transfer_function::TransferFunction,
};

use crate::config::{Config, RenderConfig};

mod cameras;
mod orbit;
mod range;
mod render;

pub fn run(config: Config) -> Result<()> {
    match config {
        Config::Range(cfg) => range::run(cfg),
        Config::Cameras(cfg) => cameras::run(cfg),
        Config::Render(cfg) => render::run(cfg),
        Config::Orbit(cfg) => orbit::run(cfg),
    }
}

fn progress_bar(len: u64, message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] {bar:40} {pos}/{len}")
            .progress_chars("=> "),
    );
    bar.set_message(message);
    bar
}

fn transfer_function(cfg: &RenderConfig, range: ValueRange) -> Result<TransferFunction> {
    let tf = TransferFunction::from_files(
        cfg.color_map,
        range,
        cfg.color_file.as_deref(),
        cfg.opacity_file.as_deref(),
    )?;
    Ok(tf)
}

fn camera_from_pose(pose: &CameraPose, cfg: &RenderConfig) -> PerspectiveCamera {
    let mut camera = PerspectiveCamera::from_pose(pose);
    camera.change_fov(cfg.fov_y);
    camera
}

fn create_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))
}

fn image_path(dir: &Path, stem: &str, cfg: &RenderConfig) -> PathBuf {
    dir.join(format!("{stem}.{}", cfg.image_ext))
}
