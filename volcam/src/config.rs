use std::{path::PathBuf, str::FromStr};

use clap::ArgMatches;
use nalgebra::{vector, Vector2, Vector3};
use volcam_lib::{
    common::ValueRange,
    render::RenderOptions,
    transfer_function::ColorMap,
    volumetric::{Endianness, RawFormat, VoxelType},
};

/// Parse all values of argument `key`
fn parse_values<T>(args: &ArgMatches, key: &str) -> Result<Vec<T>, String>
where
    T: FromStr,
{
    args.values_of(key)
        .ok_or_else(|| format!("missing argument {key}"))?
        .map(|v| v.parse::<T>().map_err(|_| format!("invalid value `{v}` of {key}")))
        .collect()
}

fn parse_value<T>(args: &ArgMatches, key: &str) -> Result<T, String>
where
    T: FromStr,
{
    let v = args
        .value_of(key)
        .ok_or_else(|| format!("missing argument {key}"))?;
    v.parse::<T>()
        .map_err(|_| format!("invalid value `{v}` of {key}"))
}

/// Transform `Values` into `Vector`
fn values_to_vector3<T>(args: &ArgMatches, key: &str) -> Result<Vector3<T>, String>
where
    T: FromStr + Copy + std::fmt::Debug + PartialEq + 'static,
{
    match parse_values::<T>(args, key)?[..] {
        [x, y, z] => Ok(vector![x, y, z]),
        _ => Err(format!("{key} needs 3 values")),
    }
}

fn values_to_vector2<T>(args: &ArgMatches, key: &str) -> Result<Vector2<T>, String>
where
    T: FromStr + Copy + std::fmt::Debug + PartialEq + 'static,
{
    match parse_values::<T>(args, key)?[..] {
        [x, y] => Ok(vector![x, y]),
        _ => Err(format!("{key} needs 2 values")),
    }
}

fn optional_path(args: &ArgMatches, key: &str) -> Option<PathBuf> {
    args.value_of(key).map(PathBuf::from)
}

fn required_path(args: &ArgMatches, key: &str) -> Result<PathBuf, String> {
    optional_path(args, key).ok_or_else(|| format!("missing argument {key}"))
}

/// Layout of input volumes
fn raw_format_from_args(args: &ArgMatches) -> Result<RawFormat, String> {
    let dims = values_to_vector3::<usize>(args, "dims")?;
    let voxel_type: VoxelType = parse_value::<String>(args, "voxel-type")?
        .parse()
        .map_err(|e| format!("{e}"))?;

    let mut format = RawFormat::new(dims, voxel_type);
    format.spacing = values_to_vector3(args, "spacing")?;
    if args.is_present("big-endian") {
        format.endianness = Endianness::Big;
    }
    Ok(format)
}

/// Settings shared by commands producing images
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub render_options: RenderOptions,
    /// Vertical field of view in degrees
    pub fov_y: f32,
    pub color_map: ColorMap,
    pub opacity_file: Option<PathBuf>,
    pub color_file: Option<PathBuf>,
    /// Extension of written images
    pub image_ext: String,
}

impl RenderConfig {
    pub fn from_args(args: &ArgMatches) -> Result<RenderConfig, String> {
        let size = values_to_vector2::<usize>(args, "size")?;
        let render_options = RenderOptions::builder()
            .resolution(size.x, size.y)
            .passes(parse_value(args, "passes")?)
            .step_size(parse_value(args, "step")?)
            .shading(args.is_present("shading"))
            .build()?;

        let color_map = ColorMap::from_name(&parse_value::<String>(args, "colormap")?);

        Ok(RenderConfig {
            render_options,
            fov_y: parse_value(args, "fovy")?,
            color_map,
            opacity_file: optional_path(args, "opacity-file"),
            color_file: optional_path(args, "color-file"),
            image_ext: parse_value(args, "format")?,
        })
    }

    /// Width and height of images
    pub fn image_size(&self) -> Vector2<u32> {
        let (w, h) = self.render_options.resolution;
        vector![w as u32, h as u32]
    }
}

#[derive(Debug)]
pub struct RangeConfig {
    pub dirs: Vec<PathBuf>,
    pub format: RawFormat,
}

#[derive(Debug)]
pub struct CamerasConfig {
    pub file: PathBuf,
    pub format: RawFormat,
    pub n_samples: usize,
    pub orbit_scale: f32,
    /// View file to write
    pub view: PathBuf,
    /// Render into this directory if present
    pub out_dir: Option<PathBuf>,
    pub render: RenderConfig,
}

/// Volumes to render
#[derive(Debug)]
pub enum Input {
    File(PathBuf),
    Timesteps { dirs: Vec<PathBuf>, stride: u32 },
}

#[derive(Debug)]
pub struct RenderCommandConfig {
    pub input: Input,
    pub format: RawFormat,
    pub view: PathBuf,
    pub out_dir: PathBuf,
    /// Transfer function range, global range of inputs if `None`
    pub range: Option<ValueRange>,
    pub render: RenderConfig,
}

#[derive(Debug)]
pub struct OrbitConfig {
    pub file: PathBuf,
    pub format: RawFormat,
    pub frames: usize,
    pub out_dir: PathBuf,
    /// Horizontal rotation drag per frame
    pub drag: f32,
    pub zoom: f32,
    /// Pan in pixels
    pub pan: Vector2<f32>,
    pub render: RenderConfig,
}

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub enum Config {
    Range(RangeConfig),
    Cameras(CamerasConfig),
    Render(RenderCommandConfig),
    Orbit(OrbitConfig),
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let (name, sub) = args
            .subcommand()
            .ok_or_else(|| "no command given".to_string())?;

        match name {
            "range" => Ok(Config::Range(RangeConfig {
                dirs: parse_values(sub, "multi-ts")?,
                format: raw_format_from_args(sub)?,
            })),
            "cameras" => Ok(Config::Cameras(CamerasConfig {
                file: required_path(sub, "file")?,
                format: raw_format_from_args(sub)?,
                n_samples: parse_value(sub, "n-samples")?,
                orbit_scale: parse_value(sub, "orbit-scale")?,
                view: required_path(sub, "view")?,
                out_dir: optional_path(sub, "out-dir"),
                render: RenderConfig::from_args(sub)?,
            })),
            "render" => {
                let input = match optional_path(sub, "file") {
                    Some(file) => Input::File(file),
                    None => Input::Timesteps {
                        dirs: parse_values(sub, "multi-ts")?,
                        stride: parse_value(sub, "stride")?,
                    },
                };
                let range = if sub.is_present("range") {
                    match parse_values::<f32>(sub, "range")?[..] {
                        [low, high] if low <= high => Some(ValueRange { low, high }),
                        [low, high] => return Err(format!("empty range {low},{high}")),
                        _ => return Err("range needs 2 values".into()),
                    }
                } else {
                    None
                };

                Ok(Config::Render(RenderCommandConfig {
                    input,
                    format: raw_format_from_args(sub)?,
                    view: required_path(sub, "view")?,
                    out_dir: required_path(sub, "out-dir")?,
                    range,
                    render: RenderConfig::from_args(sub)?,
                }))
            }
            "orbit" => Ok(Config::Orbit(OrbitConfig {
                file: required_path(sub, "file")?,
                format: raw_format_from_args(sub)?,
                frames: parse_value(sub, "frames")?,
                out_dir: required_path(sub, "out-dir")?,
                drag: parse_value(sub, "drag")?,
                zoom: parse_value(sub, "zoom")?,
                pan: values_to_vector2(sub, "pan")?,
                render: RenderConfig::from_args(sub)?,
            })),
            _ => Err(format!("unknown command {name}")),
        }
    }
}
