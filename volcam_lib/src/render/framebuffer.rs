use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};

use crate::color::{self, RGBA};
use crate::error::{Result, VolcamError};

/// Accumulates rendered frames.
/// Row 0 is the top row of the image.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    accum: Vec<RGBA>,
    passes: u32,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            accum: vec![color::zero(); width * height],
            passes: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of accumulated frames
    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn clear(&mut self) {
        self.accum.fill(color::zero());
        self.passes = 0;
    }

    /// Average of all accumulated frames, zero before the first pass
    pub fn pixel(&self, x: usize, y: usize) -> RGBA {
        if self.passes == 0 {
            return color::zero();
        }
        self.accum[x + y * self.width] / self.passes as f32
    }

    // Running sums, one pass adds one sample to every pixel
    pub(crate) fn samples_mut(&mut self) -> &mut [RGBA] {
        &mut self.accum
    }

    pub(crate) fn finish_pass(&mut self) {
        self.passes += 1;
    }

    /// sRGB encoded RGB bytes, row 0 first
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.width * self.height * 3);
        for y in 0..self.height {
            for x in 0..self.width {
                let pixel = self.pixel(x, y);
                buffer.push(color::to_byte(color::linear_to_srgb(pixel.x)));
                buffer.push(color::to_byte(color::linear_to_srgb(pixel.y)));
                buffer.push(color::to_byte(color::linear_to_srgb(pixel.z)));
            }
        }
        buffer
    }

    /// Save image, format is chosen by extension (`jpg`, `jpeg` or `png`).
    /// JPEG images are saved with quality 100.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let is_jpeg = match extension.as_deref() {
            Some("jpg") | Some("jpeg") => true,
            Some("png") => false,
            _ => return Err(VolcamError::UnsupportedImageFormat(path.to_owned())),
        };

        let file = File::create(path).map_err(|e| VolcamError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        let buffer = self.to_rgb8();
        let (w, h) = (self.width as u32, self.height as u32);
        let res = if is_jpeg {
            JpegEncoder::new_with_quality(&mut writer, 100).write_image(&buffer, w, h, ColorType::Rgb8)
        } else {
            PngEncoder::new(&mut writer).write_image(&buffer, w, h, ColorType::Rgb8)
        };
        res.map_err(|source| VolcamError::Image {
            path: path.to_owned(),
            source,
        })?;

        log::debug!("Saved {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::test_helpers::TempDir;

    #[test]
    fn averages_passes() {
        let mut fb = FrameBuffer::new(2, 1);
        assert_eq!(fb.pixel(1, 0), color::zero());

        fb.samples_mut()[1] = color::new(0.2, 0.4, 0.6, 1.0);
        fb.finish_pass();
        fb.samples_mut()[1] += color::new(0.4, 0.4, 0.2, 1.0);
        fb.finish_pass();

        assert_eq!(fb.passes(), 2);
        assert!((fb.pixel(1, 0) - color::new(0.3, 0.4, 0.4, 1.0)).norm() < 1e-6);

        fb.clear();
        assert_eq!(fb.passes(), 0);
        assert_eq!(fb.pixel(1, 0), color::zero());
    }

    #[test]
    fn rgb8_rows_top_first() {
        let mut fb = FrameBuffer::new(1, 2);
        fb.samples_mut()[0] = color::mono(1.0, 1.0);
        fb.finish_pass();

        assert_eq!(fb.to_rgb8(), vec![255, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn save_formats() {
        let dir = TempDir::new("framebuffer");
        let mut fb = FrameBuffer::new(4, 3);
        fb.samples_mut().fill(color::new(1.0, 0.0, 0.0, 1.0));
        fb.finish_pass();

        let png = dir.path().join("frame.png");
        fb.save(&png).unwrap();
        let img = image::open(&png).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0]);

        let jpg = dir.path().join("frame.JPG");
        fb.save(&jpg).unwrap();
        assert!(std::fs::metadata(&jpg).unwrap().len() > 0);

        let err = fb.save(dir.path().join("frame.bmp")).unwrap_err();
        assert!(matches!(err, VolcamError::UnsupportedImageFormat(_)));
    }
}
