use std::fs;
use std::path::PathBuf;

pub use batch::{convert_directory, BatchSummary, ConversionOutcome};
pub use cli::CLIParser;
pub use converter::{convert, ConversionTask};
pub use error::Error;

pub mod batch;
mod cli;
pub mod codec;
pub mod converter;
mod error;
mod logger;
pub mod report;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_path: PathBuf,
    output_path: Option<PathBuf>,
}

/// What [`run`] did, for the caller to present.
#[derive(Debug)]
pub enum RunOutcome {
    File { input: PathBuf, output: PathBuf },
    Directory(BatchSummary),
}

/// Converts a single file or, when the input is a directory, every WebP
/// file inside it.
pub fn run(arguments: &Arguments) -> Result<RunOutcome> {
    let input_path = &arguments.input_path;
    let metadata = fs::metadata(input_path)
        .map_err(|e| Error::InputPathUnavailable(input_path.clone(), e))?;

    if metadata.is_dir() {
        let summary = convert_directory(input_path, arguments.output_path.as_deref())?;
        return Ok(RunOutcome::Directory(summary));
    }

    let task = match &arguments.output_path {
        Some(output_path) => ConversionTask::new(input_path, output_path),
        None => ConversionTask::alongside(input_path),
    };
    task.run()?;
    Ok(RunOutcome::File {
        input: task.input_path().to_path_buf(),
        output: task.output_path().to_path_buf(),
    })
}
