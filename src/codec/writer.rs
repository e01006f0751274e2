use std::io::Write;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageResult};

use super::ImageWriter;

pub struct PngImageWriter<'a, T: Write> {
    writer: T,
    image: &'a DynamicImage,
}

impl<'a, T: Write> PngImageWriter<'a, T> {
    pub fn new(writer: T, image: &'a DynamicImage) -> Self {
        Self { writer, image }
    }
}

impl<T: Write> ImageWriter for PngImageWriter<'_, T> {
    fn write_image(&mut self) -> ImageResult<()> {
        let encoder = PngEncoder::new(&mut self.writer);
        self.image.write_with_encoder(encoder)?;
        self.writer.flush()?;
        Ok(())
    }
}
