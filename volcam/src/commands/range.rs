use anyhow::{bail, Result};
use volcam_lib::{
    common::ValueRange,
    volumetric::{load_raw_volume, scan_timesteps, Volume},
};

use super::progress_bar;
use crate::config::RangeConfig;

pub fn run(cfg: RangeConfig) -> Result<()> {
    let timesteps = scan_timesteps(&cfg.dirs)?;
    if timesteps.is_empty() {
        bail!("no timesteps found");
    }

    let bar = progress_bar(timesteps.len() as u64, "Loading");
    let mut range = ValueRange::empty();
    for ts in &timesteps {
        let volume = load_raw_volume(&ts.path, &cfg.format)?;
        range = range.union(&volume.get_range());
        bar.inc(1);
    }
    bar.finish_and_clear();

    log::info!("Range of {} timesteps", timesteps.len());
    println!("{range}");
    Ok(())
}
