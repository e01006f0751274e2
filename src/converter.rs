use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ImageResult;

use crate::codec::reader::FallbackImageReader;
use crate::codec::writer::PngImageWriter;
use crate::codec::{ImageReader, ImageWriter};
use crate::error::Error;
use crate::Result;

/// A pair of paths describing one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConversionTask {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    /// Task whose output sits next to the input with a `.png` extension.
    pub fn alongside(input_path: impl Into<PathBuf>) -> Self {
        let input_path = input_path.into();
        let output_path = png_path_for(&input_path);
        Self {
            input_path,
            output_path,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn run(&self) -> Result<()> {
        convert(&self.input_path, &self.output_path)
    }
}

/// Replaces the extension of `path` with `png`.
///
/// A dot file such as `.webp` counts as all extension and becomes `.png`.
pub fn png_path_for(path: &Path) -> PathBuf {
    let dot_file = path.extension().is_none()
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
    if dot_file {
        path.with_file_name(".png")
    } else {
        path.with_extension("png")
    }
}

fn read_input_file(file_path: &Path) -> Result<Vec<u8>> {
    fs::read(file_path).map_err(|e| Error::ReadFailed(file_path.to_path_buf(), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::CreateFailed(file_path.to_path_buf(), e))
}

/// Best effort; a failure here is logged and otherwise ignored.
pub(crate) fn remove_stray_output(file_path: &Path) {
    if let Err(e) = fs::remove_file(file_path) {
        log::warn!(
            "Unable to remove incomplete output file '{}': {}",
            file_path.display(),
            e
        );
    }
}

/// Creates `file_path`, lets `encode` fill it and forces the result to disk.
fn write_output_file<F>(file_path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> ImageResult<()>,
{
    let output_file = open_output_file(file_path)?;
    let mut output_file_writer = BufWriter::new(&output_file);
    let encoded = encode(&mut output_file_writer)
        .and_then(|()| output_file_writer.flush().map_err(Into::into));
    drop(output_file_writer);

    if let Err(e) = encoded {
        drop(output_file);
        remove_stray_output(file_path);
        return Err(Error::EncodeFailed(file_path.to_path_buf(), e));
    }

    output_file
        .sync_all()
        .map_err(|e| Error::SyncFailed(file_path.to_path_buf(), e))
}

/// Converts the WebP (or JPEG) file at `input_path` into a PNG at `output_path`.
pub fn convert(input_path: &Path, output_path: &Path) -> Result<()> {
    let input = read_input_file(input_path)?;
    let image = FallbackImageReader::new(&input)
        .read_image()
        .map_err(|attempts| Error::DecodeFailed(input_path.to_path_buf(), attempts))?;
    drop(input);

    write_output_file(output_path, |writer| {
        PngImageWriter::new(writer, &image).write_image()
    })?;
    log::debug!(
        "Wrote {}x{} PNG to '{}'",
        image.width(),
        image.height(),
        output_path.display()
    );
    Ok(())
}
