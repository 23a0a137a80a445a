use criterion::Criterion;

use crate::common::*;

fn bench_render(c: &mut Criterion, name: &str, render_options: RenderOptions) {
    let renderer = sphere_renderer(render_options);
    let camera = PerspectiveCamera::new(POSITION, DIRECTION, UP);
    let mut framebuffer = FrameBuffer::new(WIDTH, HEIGHT);

    c.bench_function(name, |b| {
        b.iter(|| {
            framebuffer.clear();
            renderer.render(&camera, &mut framebuffer);
        })
    });
}

pub fn render_sphere(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .resolution(WIDTH, HEIGHT)
        .ray_termination(false)
        .build_unchecked();

    bench_render(c, "sphere", render_options);
}

pub fn render_sphere_ert(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .resolution(WIDTH, HEIGHT)
        .ray_termination(true)
        .build_unchecked();

    bench_render(c, "sphere ert", render_options);
}

pub fn render_sphere_shaded(c: &mut Criterion) {
    let render_options = RenderOptions::builder()
        .resolution(WIDTH, HEIGHT)
        .ray_termination(true)
        .shading(true)
        .build_unchecked();

    bench_render(c, "sphere shaded", render_options);
}
