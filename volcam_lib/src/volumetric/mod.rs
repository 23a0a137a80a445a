mod linear_volume;
mod raw;
mod timesteps;
mod volume;
mod voxel_type;

pub use linear_volume::LinearVolume;
pub use raw::{load_raw_volume, RawFormat};
pub use timesteps::{every_nth, global_range, scan_timesteps, timestep_from_file_name, Timestep};
pub use volume::Volume;
pub use voxel_type::{Endianness, VoxelType};
