use crate::Arguments;
use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgMatches,
    Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const USAGE_EXAMPLES: &str = "\
Examples:
  webp-to-png image.webp
  webp-to-png image.webp output.png
  webp-to-png ./images
  webp-to-png ./images ./converted";

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_path_argument(command);
        Self::register_output_path_argument(command)
    }

    fn register_input_path_argument(command: Command) -> Command {
        command.arg(Self::create_input_path_argument())
    }

    fn register_output_path_argument(command: Command) -> Command {
        command.arg(Self::create_output_path_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
            .after_help(USAGE_EXAMPLES)
    }

    fn create_input_path_argument() -> Arg {
        Arg::new("input_path")
            .help("WebP file or directory containing WebP files")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_path_argument() -> Arg {
        Arg::new("output_path")
            .help("PNG output file or output directory [default: next to the input]")
            .value_parser(value_parser!(PathBuf))
            .required(false)
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_path: Self::extract_input_path_argument(matches),
            output_path: Self::extract_output_path_argument(matches),
        }
    }

    fn extract_input_path_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_path")
            .expect("Required argument input_path not provided")
            .clone()
    }

    fn extract_output_path_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_path").cloned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
