use std::fmt::Display;

use image::{DynamicImage, ImageError, ImageFormat, ImageResult};

use super::ImageReader;

pub type DecodeFn = fn(&[u8]) -> ImageResult<DynamicImage>;

/// One entry of a decode chain: a format name for messages and the
/// function that attempts the decode.
#[derive(Clone, Copy)]
pub struct DecodeStep {
    pub format_name: &'static str,
    pub decode: DecodeFn,
}

fn decode_webp(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::WebP)
}

fn decode_jpeg(bytes: &[u8]) -> ImageResult<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
}

/// Files named `.webp` sometimes hold JPEG data, so JPEG is the fallback.
pub const WEBP_THEN_JPEG: [DecodeStep; 2] = [
    DecodeStep {
        format_name: "WebP",
        decode: decode_webp,
    },
    DecodeStep {
        format_name: "JPEG",
        decode: decode_jpeg,
    },
];

/// Every failed attempt of a decode chain, in the order they were tried.
#[derive(Debug, Default)]
pub struct DecodeAttempts {
    failures: Vec<(&'static str, ImageError)>,
}

impl DecodeAttempts {
    fn push(&mut self, format_name: &'static str, error: ImageError) {
        self.failures.push((format_name, error));
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn format_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.failures.iter().map(|(format_name, _)| *format_name)
    }
}

impl Display for DecodeAttempts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "no decoders");
        }
        for (index, (format_name, error)) in self.failures.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", format_name, error)?;
        }
        Ok(())
    }
}

/// Decodes a whole in-memory file by trying each step of a chain in order.
pub struct FallbackImageReader<'a> {
    bytes: &'a [u8],
    chain: &'a [DecodeStep],
}

impl<'a> FallbackImageReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_chain(bytes, &WEBP_THEN_JPEG)
    }

    pub fn with_chain(bytes: &'a [u8], chain: &'a [DecodeStep]) -> Self {
        Self { bytes, chain }
    }
}

impl ImageReader for FallbackImageReader<'_> {
    type Error = DecodeAttempts;

    fn read_image(&mut self) -> Result<DynamicImage, DecodeAttempts> {
        let mut attempts = DecodeAttempts::default();
        for step in self.chain {
            match (step.decode)(self.bytes) {
                Ok(image) => {
                    if !attempts.is_empty() {
                        log::debug!(
                            "Decoded as {} after {} failed",
                            step.format_name,
                            attempts.format_names().collect::<Vec<_>>().join(", ")
                        );
                    }
                    return Ok(image);
                }
                Err(error) => attempts.push(step.format_name, error),
            }
        }
        Err(attempts)
    }
}

#[cfg(test)]
mod tests {
    use image::GenericImageView;

    use super::{DecodeStep, FallbackImageReader, WEBP_THEN_JPEG};
    use crate::codec::fixtures::{jpeg_bytes, webp_bytes};
    use crate::codec::ImageReader;

    #[test]
    fn decodes_webp() {
        let bytes = webp_bytes(12, 5);
        let image = FallbackImageReader::new(&bytes)
            .read_image()
            .expect("WebP decode failed");
        assert_eq!(image.dimensions(), (12, 5));
    }

    #[test]
    fn falls_back_to_jpeg() {
        let bytes = jpeg_bytes(9, 17);
        let image = FallbackImageReader::new(&bytes)
            .read_image()
            .expect("JPEG fallback failed");
        assert_eq!(image.dimensions(), (9, 17));
    }

    #[test]
    fn collects_every_failed_attempt() {
        let bytes = b"definitely not an image".to_vec();
        let attempts = match FallbackImageReader::new(&bytes).read_image() {
            Ok(_) => panic!("Garbage decoded as an image"),
            Err(attempts) => attempts,
        };
        assert_eq!(attempts.len(), 2);
        assert_eq!(
            attempts.format_names().collect::<Vec<_>>(),
            vec!["WebP", "JPEG"]
        );
        let message = attempts.to_string();
        assert!(message.starts_with("WebP: "));
        assert!(message.contains("; JPEG: "));
    }

    #[test]
    fn chain_order_is_respected() {
        let jpeg_only: [DecodeStep; 1] = [WEBP_THEN_JPEG[1]];
        let bytes = webp_bytes(4, 4);
        let result = FallbackImageReader::with_chain(&bytes, &jpeg_only).read_image();
        match result {
            Ok(_) => panic!("WebP data decoded by the JPEG decoder"),
            Err(attempts) => {
                assert_eq!(attempts.format_names().collect::<Vec<_>>(), vec!["JPEG"])
            }
        }
    }

    #[test]
    fn empty_chain_reports_no_decoders() {
        let bytes = webp_bytes(2, 2);
        match FallbackImageReader::with_chain(&bytes, &[]).read_image() {
            Ok(_) => panic!("Empty chain decoded an image"),
            Err(attempts) => assert_eq!(attempts.to_string(), "no decoders"),
        }
    }
}
