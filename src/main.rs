use std::env::args_os;
use std::path::Path;
use std::process::ExitCode;

use webp_to_png::{run, CLIParser, RunOutcome};

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match run(&arguments) {
        Ok(RunOutcome::File { input, output }) => {
            println!(
                "Conversion successful: {} -> {}",
                file_name(&input),
                file_name(&output)
            );
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Directory(summary)) => {
            if let Some(report_path) = &summary.report_path {
                println!("Error report: {}", report_path.display());
            }
            println!(
                "Conversion finished. Successful: {} of {}, failed: {}",
                summary.succeeded(),
                summary.eligible,
                summary.failed()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_batch_fatal() {
                eprintln!("Batch conversion aborted because of: {}", e);
            } else {
                eprintln!("Conversion failed because of: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
