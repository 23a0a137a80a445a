use nalgebra::{point, vector, Vector2};
use volcam_lib::{
    camera::{
        orbit_cameras, read_view_file, write_view_file, ArcballCamera, PerspectiveCamera,
        DEFAULT_FOV_Y, DEFAULT_ORBIT_SCALE,
    },
    common::{BoundBox, ValueRange},
    render::{FrameBuffer, RenderOptions, Renderer},
    render_views,
    test_helpers::{self, TempDir},
    transfer_function::{ColorMap, TransferFunction},
    volumetric::{global_range, load_raw_volume, scan_timesteps, RawFormat, Volume, VoxelType},
};

pub const WIDTH: usize = 32;
pub const HEIGHT: usize = 24;

fn sphere_bytes(side: usize) -> Vec<u8> {
    let volume = test_helpers::sphere_volume(side);
    volume.data().iter().map(|&v| (v * 255.0) as u8).collect()
}

#[test]
fn orbit_views_of_raw_file() {
    let dir = TempDir::new("orbit_views");
    let raw = dir.write("sphere_0.raw", &sphere_bytes(16));
    let format = RawFormat::new(vector![16, 16, 16], VoxelType::U8);

    let volume = load_raw_volume(&raw, &format).unwrap();
    let cameras = orbit_cameras(4, &volume.get_bound_box(), DEFAULT_ORBIT_SCALE * 4.0);

    let views = dir.path().join("cameras.txt");
    write_view_file(&views, &cameras).unwrap();
    let cameras = read_view_file(&views).unwrap();
    assert_eq!(cameras.len(), 4);

    let tf = TransferFunction::new(ColorMap::Jet, volume.get_range());
    let render_options = RenderOptions::builder()
        .resolution(WIDTH, HEIGHT)
        .passes(2)
        .build()
        .unwrap();

    let frames = render_views(&raw, &format, tf, render_options, &cameras, DEFAULT_FOV_Y).unwrap();
    assert_eq!(frames.len(), 4);

    for (i, frame) in frames.iter().enumerate() {
        // sphere in the middle, background in the corner
        assert!(frame.pixel(WIDTH / 2, HEIGHT / 2).w > 0.5);
        assert_eq!(frame.pixel(0, 0).w, 0.0);

        let path = dir.path().join(format!("volume{}.png", i + 1));
        frame.save(&path).unwrap();
        assert!(path.is_file());
    }
}

#[test]
fn arcball_drives_renderer() {
    let volume = test_helpers::sphere_volume(16);
    let bounds = volume.get_bound_box();
    let tf = TransferFunction::new(ColorMap::Grayscale, volume.get_range());
    let render_options = RenderOptions::builder()
        .resolution(WIDTH, HEIGHT)
        .build()
        .unwrap();
    let renderer = Renderer::new(volume, tf, render_options);

    let img_size: Vector2<u32> = vector![WIDTH as u32, HEIGHT as u32];
    let mut arcball = ArcballCamera::new(bounds, img_size);
    arcball.rotate(vector![0.0, 0.0], vector![0.3, -0.2]);
    arcball.zoom(-2.0);

    // center of the volume lands in the middle of the image
    let projection = arcball.world_to_pixel(bounds.center(), img_size, DEFAULT_FOV_Y);
    assert!((projection.pixel - vector![WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0]).norm() < 1e-2);

    let mut camera = PerspectiveCamera::from_pose(&arcball.pose());
    camera.change_fov(DEFAULT_FOV_Y);
    let mut framebuffer = FrameBuffer::new(WIDTH, HEIGHT);
    renderer.render(&camera, &mut framebuffer);

    let (x, y) = (projection.pixel.x as usize, HEIGHT - projection.pixel.y as usize);
    assert!(framebuffer.pixel(x, y).w > 0.5);
}

#[test]
fn corner_projection_matches_rendered_silhouette() {
    let volume = test_helpers::filled_volume(vector![9, 9, 9], 1.0);
    let bounds = volume.get_bound_box();
    let tf = TransferFunction::new(ColorMap::Grayscale, ValueRange::from(0.0..2.0));
    let render_options = RenderOptions::builder()
        .resolution(WIDTH * 2, HEIGHT * 2)
        .build()
        .unwrap();
    let (w, h) = render_options.resolution;
    let renderer = Renderer::new(volume, tf, render_options);

    let img_size: Vector2<u32> = vector![w as u32, h as u32];
    let mut arcball = ArcballCamera::new(bounds, img_size);
    arcball.zoom(150.0);
    arcball.rotate(vector![0.0, 0.0], vector![0.4, 0.25]);

    let mut camera = PerspectiveCamera::from_pose(&arcball.pose());
    camera.change_fov(DEFAULT_FOV_Y);
    let mut framebuffer = FrameBuffer::new(w, h);
    renderer.render(&camera, &mut framebuffer);

    assert_eq!(framebuffer.pixel(0, 0).w, 0.0);
    for corner in bounds {
        let projection = arcball.world_to_pixel(corner, img_size, DEFAULT_FOV_Y);
        assert!(projection.depth > 0.0);
        assert!(projection.pixel.x > 0.0 && projection.pixel.x < w as f32);
        assert!(projection.pixel.y > 0.0 && projection.pixel.y < h as f32);

        // rows of the framebuffer go from the top
        let x = projection.pixel.x as usize;
        let y = (h as f32 - projection.pixel.y) as usize;
        let covered = (y.saturating_sub(2)..=usize::min(y + 2, h - 1)).any(|row| {
            (x.saturating_sub(2)..=usize::min(x + 2, w - 1))
                .any(|col| framebuffer.pixel(col, row).w > 0.0)
        });
        assert!(covered, "corner {corner} at {x} {y} not on the cube");
    }
}

#[test]
fn projected_point_lies_on_camera_ray() {
    let bounds = BoundBox::new(point![-1.0, -1.0, -1.0], point![1.0, 1.0, 1.0]);
    let img_size: Vector2<u32> = vector![200, 100];
    let mut arcball = ArcballCamera::new(bounds, img_size);
    arcball.rotate(vector![0.0, 0.0], vector![0.35, -0.2]);
    arcball.pan(vector![15.0, -10.0]);

    let mut camera = PerspectiveCamera::from_pose(&arcball.pose());
    camera.change_fov(DEFAULT_FOV_Y);
    camera.change_aspect_from_resolution(img_size.x, img_size.y);

    for world in [point![0.5, -0.5, 0.5], point![-0.8, 0.3, -0.2], point![1.0, 1.0, -1.0]] {
        let projection = arcball.world_to_pixel(world, img_size, DEFAULT_FOV_Y);
        assert!(projection.depth > 0.0);

        let (w, h) = (img_size.x as f32, img_size.y as f32);
        let ray = camera.get_ray((projection.pixel.x / w, (h - projection.pixel.y) / h));
        let to_point = (world - arcball.eye_pos()).normalize();
        assert!((ray.origin - arcball.eye_pos()).norm() < 1e-4);
        assert!((ray.direction - to_point).norm() < 1e-4);
    }
}

#[test]
fn timestep_directory() {
    let dir = TempDir::new("timestep_directory");
    dir.write("step_2.raw", &[4, 9]);
    dir.write("step_1.raw", &[1, 3]);
    dir.write("readme.md", b"not a volume");

    let format = RawFormat::new(vector![2, 1, 1], VoxelType::U8);
    let timesteps = scan_timesteps(&[dir.path()]).unwrap();
    assert_eq!(timesteps.len(), 2);
    assert_eq!(timesteps[0].index, 1);

    let range = global_range(timesteps.iter().map(|ts| &ts.path), &format).unwrap();
    assert_eq!(range, ValueRange::from(1.0..9.0));
}
