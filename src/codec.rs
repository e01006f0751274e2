use image::{DynamicImage, ImageResult};

pub mod reader;
pub mod writer;

pub trait ImageReader {
    type Error;

    fn read_image(&mut self) -> Result<DynamicImage, Self::Error>;
}

pub trait ImageWriter {
    fn write_image(&mut self) -> ImageResult<()>;
}
