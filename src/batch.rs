use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::converter::{png_path_for, remove_stray_output, ConversionTask};
use crate::error::Error;
use crate::report::ConversionReport;
use crate::Result;

const ELIGIBLE_EXTENSION: &str = ".webp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Success,
    Failure { file_name: String, message: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of a directory run that was not aborted.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub eligible: usize,
    pub outcomes: Vec<ConversionOutcome>,
    pub report_path: Option<PathBuf>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Accumulates outcomes between single-file conversions of one run.
struct BatchRun {
    outcomes: Vec<ConversionOutcome>,
}

impl BatchRun {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    fn record_success(&mut self) {
        self.outcomes.push(ConversionOutcome::Success);
    }

    fn record_failure(&mut self, file_name: String, error: &Error) {
        log::error!("Conversion of '{}' failed: {}", file_name, error);
        self.outcomes.push(ConversionOutcome::Failure {
            file_name,
            message: error.to_string(),
        });
    }
}

/// A file name is eligible when it ends in `.webp`, ignoring case.
pub fn is_eligible_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(ELIGIBLE_EXTENSION)
}

/// Non-directory entries of `input_dir` with an eligible name, sorted by name.
pub fn list_eligible_files(input_dir: &Path) -> Result<Vec<OsString>> {
    let list_failed = |e| Error::ListFailed(input_dir.to_path_buf(), e);
    let mut file_names = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(list_failed)? {
        let entry = entry.map_err(list_failed)?;
        if entry.file_type().map_err(list_failed)?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        if is_eligible_file_name(&file_name.to_string_lossy()) {
            file_names.push(file_name);
        }
    }
    file_names.sort();
    Ok(file_names)
}

/// Checks that a reportedly written file exists and is not empty.
///
/// An empty file is removed before the error is returned.
pub fn verify_output(output_path: &Path) -> Result<()> {
    let metadata = fs::metadata(output_path)
        .map_err(|e| Error::OutputMissing(output_path.to_path_buf(), e))?;
    if metadata.len() == 0 {
        remove_stray_output(output_path);
        return Err(Error::OutputEmpty(output_path.to_path_buf()));
    }
    Ok(())
}

/// Converts every eligible file of `input_dir` into PNG.
///
/// `output_dir` defaults to `input_dir` when absent or empty. Only a
/// directory that cannot be listed or an output directory that cannot be
/// created make the whole run fail; per-file failures end up in the summary
/// and in the error report.
pub fn convert_directory(input_dir: &Path, output_dir: Option<&Path>) -> Result<BatchSummary> {
    convert_directory_with(input_dir, output_dir, ConversionTask::run)
}

/// Batch run with `convert` standing in for the single-file conversion.
fn convert_directory_with<F>(
    input_dir: &Path,
    output_dir: Option<&Path>,
    mut convert: F,
) -> Result<BatchSummary>
where
    F: FnMut(&ConversionTask) -> Result<()>,
{
    let file_names = list_eligible_files(input_dir)?;
    if file_names.is_empty() {
        log::info!("No WebP files found in '{}'", input_dir.display());
        return Ok(BatchSummary::default());
    }
    log::info!("Found {} WebP file(s)", file_names.len());

    let output_dir = match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => input_dir,
    };
    if output_dir != input_dir {
        fs::create_dir_all(output_dir)
            .map_err(|e| Error::MkdirFailed(output_dir.to_path_buf(), e))?;
    }

    let mut run = BatchRun::with_capacity(file_names.len());
    for file_name in &file_names {
        convert_entry(&mut run, input_dir, output_dir, file_name, &mut convert);
    }

    let report = ConversionReport::new(&run.outcomes);
    let report_path = if report.is_empty() {
        None
    } else {
        match report.save(output_dir) {
            Ok(path) => {
                log::info!("Error report written to '{}'", path.display());
                Some(path)
            }
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    };

    Ok(BatchSummary {
        eligible: file_names.len(),
        outcomes: run.outcomes,
        report_path,
    })
}

fn convert_entry<F>(
    run: &mut BatchRun,
    input_dir: &Path,
    output_dir: &Path,
    file_name: &OsString,
    convert: &mut F,
) where
    F: FnMut(&ConversionTask) -> Result<()>,
{
    let output_name = png_path_for(Path::new(file_name));
    let task = ConversionTask::new(input_dir.join(file_name), output_dir.join(&output_name));
    let display_name = file_name.to_string_lossy().into_owned();

    let converted = convert(&task).and_then(|()| verify_output(task.output_path()));
    match converted {
        Ok(()) => {
            log::info!(
                "Converted: {} -> {}",
                display_name,
                output_name.display()
            );
            run.record_success();
        }
        Err(e) => run.record_failure(display_name, &e),
    }
}
