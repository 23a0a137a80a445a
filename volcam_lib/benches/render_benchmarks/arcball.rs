use criterion::{black_box, Criterion};
use volcam_lib::camera::{orbit_cameras, DEFAULT_FOV_Y, DEFAULT_ORBIT_SCALE};

use crate::common::*;

fn bounds() -> BoundBox {
    BoundBox::new(point![-1.0, -1.0, -1.0], point![1.0, 1.0, 1.0])
}

pub fn arcball_interaction(c: &mut Criterion) {
    let mut camera = ArcballCamera::new(bounds(), vector![1280, 720]);

    c.bench_function("arcball rotate zoom pan", |b| {
        b.iter(|| {
            camera.rotate(black_box(vector![0.1, 0.2]), black_box(vector![0.15, 0.1]));
            camera.zoom(black_box(0.5));
            camera.zoom(black_box(-0.5));
            camera.pan(black_box(vector![3.0, -2.0]));
            camera.pan(black_box(vector![-3.0, 2.0]));
        })
    });
}

pub fn arcball_projection(c: &mut Criterion) {
    let camera = ArcballCamera::new(bounds(), vector![1280, 720]);

    c.bench_function("arcball world to pixel", |b| {
        b.iter(|| {
            for corner in bounds() {
                black_box(camera.world_to_pixel(corner, vector![1280, 720], DEFAULT_FOV_Y));
            }
        })
    });
}

pub fn orbit_generation(c: &mut Criterion) {
    c.bench_function("orbit 1000 cameras", |b| {
        b.iter(|| orbit_cameras(black_box(1000), &bounds(), DEFAULT_ORBIT_SCALE))
    });
}
