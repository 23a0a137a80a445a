/// Renderer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Image `(width, height)` in pixels
    pub resolution: (usize, usize),
    /// Stop marching once the ray is almost opaque
    pub ray_termination: bool,
    /// Diffuse shading from the volume gradient
    pub shading: bool,
    /// Distance between samples along a ray, in world units
    pub step_size: f32,
    /// Number of accumulated frames, all but the first are jittered
    pub passes: u32,
    /// Gray level of the background, `<0;1>`
    pub background: f32,
    /// Seed of the jitter generator
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            resolution: (256, 256),
            ray_termination: true,
            shading: false,
            step_size: 1.0,
            passes: 1,
            background: 1.0,
            seed: 0,
        }
    }
}

impl RenderOptions {
    pub fn builder() -> RenderOptionsBuilder {
        RenderOptionsBuilder::default()
    }
}

#[derive(Default)]
pub struct RenderOptionsBuilder {
    options: RenderOptions,
}

impl RenderOptionsBuilder {
    pub fn resolution(mut self, width: usize, height: usize) -> Self {
        self.options.resolution = (width, height);
        self
    }

    pub fn ray_termination(mut self, enable: bool) -> Self {
        self.options.ray_termination = enable;
        self
    }

    pub fn shading(mut self, enable: bool) -> Self {
        self.options.shading = enable;
        self
    }

    pub fn step_size(mut self, step_size: f32) -> Self {
        self.options.step_size = step_size;
        self
    }

    pub fn passes(mut self, passes: u32) -> Self {
        self.options.passes = passes;
        self
    }

    pub fn background(mut self, gray: f32) -> Self {
        self.options.background = gray;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = seed;
        self
    }

    /// Build options, checking that the image is not empty,
    /// step size is positive and at least one pass is rendered
    pub fn build(self) -> Result<RenderOptions, &'static str> {
        let opts = self.options;
        if opts.resolution.0 == 0 || opts.resolution.1 == 0 {
            return Err("Resolution must be nonzero");
        }
        if !(opts.step_size.is_finite() && opts.step_size > 0.0) {
            return Err("Step size must be positive");
        }
        if opts.passes == 0 {
            return Err("At least one pass is needed");
        }
        Ok(opts)
    }

    pub fn build_unchecked(self) -> RenderOptions {
        self.options
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn builder_sets_fields() {
        let opts = RenderOptions::builder()
            .resolution(640, 480)
            .shading(true)
            .step_size(0.5)
            .passes(4)
            .background(0.0)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(opts.resolution, (640, 480));
        assert!(opts.shading);
        assert!(opts.ray_termination);
        assert_eq!(opts.step_size, 0.5);
        assert_eq!(opts.passes, 4);
        assert_eq!(opts.background, 0.0);
        assert_eq!(opts.seed, 7);
    }

    #[test]
    fn invalid_options() {
        assert!(RenderOptions::builder().resolution(0, 10).build().is_err());
        assert!(RenderOptions::builder().step_size(0.0).build().is_err());
        assert!(RenderOptions::builder().step_size(f32::NAN).build().is_err());
        assert!(RenderOptions::builder().passes(0).build().is_err());

        let unchecked = RenderOptions::builder().passes(0).build_unchecked();
        assert_eq!(unchecked.passes, 0);
    }
}
