use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::batch::ConversionOutcome;
use crate::error::Error;
use crate::Result;

pub const REPORT_FILE_NAME: &str = "conversion_errors.txt";

const HEADER: &str = "Отчет об ошибках конвертации";
const UNDERLINE: &str = "================================";
const TOTAL_LABEL: &str = "Всего ошибок";
const FILE_LABEL: &str = "Файл";
const ERROR_LABEL: &str = "Ошибка";

/// Read-only listing of the failures of one batch run, in discovery order.
pub struct ConversionReport<'a> {
    failures: Vec<(&'a str, &'a str)>,
}

impl<'a> ConversionReport<'a> {
    pub fn new(outcomes: &'a [ConversionOutcome]) -> Self {
        let failures = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ConversionOutcome::Success => None,
                ConversionOutcome::Failure { file_name, message } => {
                    Some((file_name.as_str(), message.as_str()))
                }
            })
            .collect();
        Self { failures }
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn write<T: Write>(&self, writer: &mut T) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)?;
        writeln!(writer, "{}", UNDERLINE)?;
        writeln!(writer)?;
        writeln!(writer, "{}: {}", TOTAL_LABEL, self.failure_count())?;
        writeln!(writer)?;
        for (index, (file_name, message)) in self.failures.iter().enumerate() {
            writeln!(writer, "{}. {}: {}", index + 1, FILE_LABEL, file_name)?;
            writeln!(writer, "   {}: {}", ERROR_LABEL, message)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes the report as [`REPORT_FILE_NAME`] into `directory`.
    pub fn save(&self, directory: &Path) -> Result<PathBuf> {
        let report_path = directory.join(REPORT_FILE_NAME);
        let report_failed = |e| Error::ReportFailed(report_path.clone(), e);
        let report_file = File::create(&report_path).map_err(report_failed)?;
        let mut writer = BufWriter::new(report_file);
        self.write(&mut writer).map_err(report_failed)?;
        writer.flush().map_err(report_failed)?;
        Ok(report_path)
    }
}
