//! Argument parsing and validation
//! Uses library `clap`

use clap::{Arg, ArgGroup, Command, ValueHint};
use volcam_lib::{transfer_function::ColorMap, volumetric::VoxelType};

// up to 32bit value
pub fn is_positive_number(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n > 0 {
                Ok(())
            } else {
                Err("Number must be greater than 0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_positive_float(num: &str) -> Result<(), String> {
    let n = num.parse::<f32>();
    match n {
        Ok(n) => {
            if n > 0.0 && n.is_finite() {
                Ok(())
            } else {
                Err("Number must be greater than 0.0".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_float(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Number required".into()),
    }
}

pub fn is_field_of_view(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n > 0.0 && n < 180.0 => Ok(()),
        _ => Err("Field of view must be in range (0;180) degrees".into()),
    }
}

pub const IMAGE_FORMATS: &[&str] = &["jpg", "png"];

fn volume_args<'a>() -> Vec<Arg<'a>> {
    vec![
        Arg::new("dims")
            .help("Dimensions of volume")
            .long("dims")
            .short('d')
            .required(true)
            .number_of_values(3)
            .value_names(&["X", "Y", "Z"])
            .use_value_delimiter(true)
            .require_value_delimiter(true)
            .require_equals(true)
            .validator(is_positive_number),
        Arg::new("voxel-type")
            .help("Type of samples")
            .long("voxel-type")
            .short('t')
            .value_name("TYPE")
            .default_value("float32")
            .possible_values(VoxelType::NAMES),
        Arg::new("big-endian")
            .help("Samples are stored in big endian byte order")
            .long("big-endian"),
        Arg::new("spacing")
            .help("Shape of cell")
            .long("spacing")
            .short('s')
            .number_of_values(3)
            .value_names(&["X", "Y", "Z"])
            .use_value_delimiter(true)
            .require_value_delimiter(true)
            .require_equals(true)
            .default_values(&["1", "1", "1"])
            .validator(is_positive_float),
    ]
}

fn render_args<'a>() -> Vec<Arg<'a>> {
    vec![
        Arg::new("size")
            .help("Resolution of images")
            .long("size")
            .number_of_values(2)
            .value_names(&["W", "H"])
            .use_value_delimiter(true)
            .require_value_delimiter(true)
            .require_equals(true)
            .default_values(&["256", "256"])
            .validator(is_positive_number),
        Arg::new("passes")
            .help("Accumulated frames per image")
            .long("passes")
            .value_name("N")
            .default_value("10")
            .validator(is_positive_number),
        Arg::new("fovy")
            .help("Vertical field of view in degrees")
            .long("fovy")
            .value_name("DEG")
            .default_value("60")
            .validator(is_field_of_view),
        Arg::new("colormap")
            .help("Color map of the transfer function")
            .long("colormap")
            .value_name("NAME")
            .default_value("jet")
            .possible_values(ColorMap::NAMES),
        Arg::new("opacity-file")
            .help("Opacity control points, one per line")
            .long("opacity-file")
            .value_name("FILE")
            .value_hint(ValueHint::FilePath),
        Arg::new("color-file")
            .help("Color control points, `r g b` per line")
            .long("color-file")
            .value_name("FILE")
            .value_hint(ValueHint::FilePath),
        Arg::new("format")
            .help("Format of output images")
            .long("format")
            .value_name("EXT")
            .default_value("jpg")
            .possible_values(IMAGE_FORMATS),
        Arg::new("step")
            .help("Distance between samples along a ray")
            .long("step")
            .value_name("STEP")
            .default_value("1")
            .validator(is_positive_float),
        Arg::new("shading")
            .help("Shade samples using the volume gradient")
            .long("shading"),
    ]
}

fn file_arg<'a>() -> Arg<'a> {
    Arg::new("file")
        .help("Raw volume file")
        .long("file")
        .short('f')
        .value_name("FILE")
        .value_hint(ValueHint::FilePath)
}

fn multi_ts_arg<'a>() -> Arg<'a> {
    Arg::new("multi-ts")
        .help("Directories with one raw file per timestep")
        .long("multi-ts")
        .value_name("DIR")
        .multiple_values(true)
        .value_hint(ValueHint::DirPath)
}

fn out_dir_arg<'a>() -> Arg<'a> {
    Arg::new("out-dir")
        .help("Directory for rendered images")
        .long("out-dir")
        .short('o')
        .value_name("DIR")
        .value_hint(ValueHint::DirPath)
}

pub fn get_command<'a>() -> Command<'a> {
    Command::new("volcam")
        .version("0.1.0")
        .about("Volume renderer and camera generator")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("range")
                .about("Print value range of all timesteps")
                .arg(multi_ts_arg().required(true))
                .args(volume_args()),
        )
        .subcommand(
            Command::new("cameras")
                .about("Generate cameras on a sphere around the volume")
                .arg(file_arg().required(true))
                .arg(
                    Arg::new("n-samples")
                        .help("Number of cameras")
                        .long("n-samples")
                        .short('n')
                        .value_name("N")
                        .default_value("100")
                        .validator(is_positive_number),
                )
                .arg(
                    Arg::new("orbit-scale")
                        .help("Orbit radius relative to the volume diagonal")
                        .long("orbit-scale")
                        .value_name("SCALE")
                        .default_value("0.5")
                        .validator(is_positive_float),
                )
                .arg(
                    Arg::new("view")
                        .help("Output view file")
                        .long("view")
                        .value_name("FILE")
                        .default_value("cameras.txt")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(out_dir_arg().help("Also render the volume from every camera into DIR"))
                .args(volume_args())
                .args(render_args()),
        )
        .subcommand(
            Command::new("render")
                .about("Render every timestep from every camera of a view file")
                .arg(file_arg())
                .arg(multi_ts_arg())
                .group(
                    ArgGroup::new("input")
                        .args(&["file", "multi-ts"])
                        .required(true),
                )
                .arg(
                    Arg::new("view")
                        .help("View file with cameras")
                        .long("view")
                        .required(true)
                        .value_name("FILE")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(out_dir_arg().required(true))
                .arg(
                    Arg::new("stride")
                        .help("Render only timesteps divisible by N")
                        .long("stride")
                        .value_name("N")
                        .default_value("1")
                        .validator(is_positive_number),
                )
                .arg(
                    Arg::new("range")
                        .help("Value range of the transfer function, global range of inputs if left out")
                        .long("range")
                        .number_of_values(2)
                        .value_names(&["LOW", "HIGH"])
                        .use_value_delimiter(true)
                        .require_value_delimiter(true)
                        .require_equals(true)
                        .allow_hyphen_values(true)
                        .validator(is_float),
                )
                .args(volume_args())
                .args(render_args()),
        )
        .subcommand(
            Command::new("orbit")
                .about("Orbit the volume with an arcball camera and annotate box corners")
                .arg(file_arg().required(true))
                .arg(
                    Arg::new("frames")
                        .help("Number of frames")
                        .long("frames")
                        .value_name("N")
                        .default_value("36")
                        .validator(is_positive_number),
                )
                .arg(out_dir_arg().required(true))
                .arg(
                    Arg::new("drag")
                        .help("Horizontal mouse drag per frame, in normalized screen units")
                        .long("drag")
                        .value_name("D")
                        .default_value("0.1")
                        .allow_hyphen_values(true)
                        .validator(is_float),
                )
                .arg(
                    Arg::new("zoom")
                        .help("Zoom applied before the first frame, positive moves away")
                        .long("zoom")
                        .value_name("Z")
                        .default_value("0")
                        .allow_hyphen_values(true)
                        .validator(is_float),
                )
                .arg(
                    Arg::new("pan")
                        .help("Pan in pixels applied before the first frame")
                        .long("pan")
                        .number_of_values(2)
                        .value_names(&["DX", "DY"])
                        .use_value_delimiter(true)
                        .require_value_delimiter(true)
                        .require_equals(true)
                        .allow_hyphen_values(true)
                        .default_values(&["0", "0"])
                        .validator(is_float),
                )
                .args(volume_args())
                .args(render_args()),
        )
}
