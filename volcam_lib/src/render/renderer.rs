use nalgebra::vector;
use rayon::prelude::*;

use crate::{
    camera::PerspectiveCamera,
    color::{self, RGBA},
    common::Ray,
    transfer_function::TransferFunction,
    volumetric::Volume,
};

use super::{FrameBuffer, RenderOptions};

/// Opacity at which marching stops when ray termination is on
const TERMINATION_OPACITY: f32 = 0.99;

pub struct Renderer<V>
where
    V: Volume,
{
    volume: V,
    tf: TransferFunction,
    render_options: RenderOptions,
}

impl<V> Renderer<V>
where
    V: Volume,
{
    pub fn new(volume: V, tf: TransferFunction, render_options: RenderOptions) -> Renderer<V> {
        Renderer {
            volume,
            tf,
            render_options,
        }
    }

    /// Replace the volume, for example with the next timestep
    pub fn set_volume(&mut self, volume: V) {
        self.volume = volume;
    }

    /// Render `passes` frames into `framebuffer`, adding to its content.
    /// Buffer of a different resolution is replaced by an empty one.
    pub fn render(&self, camera: &PerspectiveCamera, framebuffer: &mut FrameBuffer) {
        let (img_w, img_h) = self.render_options.resolution;
        if framebuffer.resolution() != (img_w, img_h) {
            log::debug!("Framebuffer resized to {img_w}x{img_h}");
            *framebuffer = FrameBuffer::new(img_w, img_h);
        }
        if img_w == 0 || img_h == 0 {
            return;
        }

        let mut camera = camera.clone();
        camera.change_aspect_from_resolution(img_w as u32, img_h as u32);

        for _ in 0..self.render_options.passes {
            self.render_pass(&camera, framebuffer);
        }
    }

    fn render_pass(&self, camera: &PerspectiveCamera, framebuffer: &mut FrameBuffer) {
        let (img_w, img_h) = self.render_options.resolution;
        let pass = framebuffer.passes() as u64;
        let seed = self.render_options.seed;

        let step_x = 1.0 / img_w as f32;
        let step_y = 1.0 / img_h as f32;

        framebuffer
            .samples_mut()
            .par_chunks_mut(img_w)
            .enumerate()
            .for_each(|(y, row)| {
                // first pass goes through pixel centers
                let rng = fastrand::Rng::with_seed(seed ^ (pass * img_h as u64 + y as u64));
                let jitter = || {
                    if pass == 0 {
                        0.5
                    } else {
                        rng.f32()
                    }
                };

                for (x, pixel) in row.iter_mut().enumerate() {
                    let pixel_coord = (
                        (x as f32 + jitter()) * step_x,
                        (y as f32 + jitter()) * step_y,
                    );
                    let ray = camera.get_ray(pixel_coord);
                    *pixel += self.shade_pixel(&ray);
                }
            });

        framebuffer.finish_pass();
    }

    // Composite over the background
    fn shade_pixel(&self, ray: &Ray) -> RGBA {
        let accum = self.collect_light(ray);
        let background = self.render_options.background * (1.0 - accum.w);
        color::new(
            accum.x + background,
            accum.y + background,
            accum.z + background,
            accum.w,
        )
    }

    /// March along `ray` and accumulate color front to back.
    /// Returned color is premultiplied by opacity.
    pub fn collect_light(&self, ray: &Ray) -> RGBA {
        let mut accum = color::zero();

        let (t0, t1) = match self.volume.intersect(ray) {
            Some(e) => e,
            None => return accum,
        };
        let t0 = f32::max(t0, 0.0);
        if t1 <= t0 {
            return accum;
        }

        let step_size = self.render_options.step_size;
        let obj_ray = ray.transform_to_volume_space(
            self.volume.get_bound_box(),
            self.volume.get_spacing(),
            t0,
        );
        let max_n_of_steps = ((t1 - t0) / step_size) as usize + 1;

        let step = obj_ray.direction * step_size;
        let mut pos = obj_ray.origin;

        // headlight
        let light_dir = -ray.direction;

        for _ in 0..max_n_of_steps {
            let (sample, shade) = if self.render_options.shading {
                let (sample, grad) = self.volume.sample_at_gradient(pos);
                let grad_len = grad.norm();
                let n_dot_l = if grad_len > f32::EPSILON {
                    (grad / grad_len).dot(&light_dir).abs()
                } else {
                    1.0
                };
                (sample, 0.3 + 0.7 * n_dot_l)
            } else {
                (self.volume.sample_at(pos), 1.0)
            };

            pos += step;

            let color_b = self.tf.sample(sample);
            if color_b.w == 0.0 {
                continue;
            }

            // opacity of control points is defined for unit step
            let opacity = 1.0 - f32::powf(1.0 - color_b.w, step_size);
            let rgb = color_b.xyz() * shade;

            accum += (1.0 - accum.w) * opacity * vector![rgb.x, rgb.y, rgb.z, 1.0];

            if self.render_options.ray_termination && accum.w > TERMINATION_OPACITY {
                break;
            }
        }
        accum
    }
}
