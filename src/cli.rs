//! Command-line interface implementation for gpig.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

use crate::params::{ParameterId, ParameterSet};

/// Command-line arguments structure for gpig.
#[derive(Parser, Debug)]
#[command(author, version, about = "gpig: installer package generator", long_about = None)]
pub struct Args {
    /// Generator package (with package.json and Templates/) or template directory
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Empty directory where the installer package will be created
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Package name of the installer (com.author.name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Version of the installer (major.minor.patch)
    #[arg(long, value_name = "VERSION")]
    pub pkg_version: Option<String>,

    /// Display name of the installer
    #[arg(long, value_name = "DISPLAY_NAME")]
    pub display_name: Option<String>,

    /// Author of the installer
    #[arg(long, value_name = "AUTHOR")]
    pub author: Option<String>,

    /// Root of the host project holding Assets/ and Packages/
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Read parameters as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Use defaults for missing parameters instead of prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Copy non-template files of the template tree verbatim
    #[arg(long)]
    pub copy_opaque: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parameters given through flags.
    pub fn parameters(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        let flags = [
            (ParameterId::PackageName, &self.name),
            (ParameterId::Version, &self.pkg_version),
            (ParameterId::DisplayName, &self.display_name),
            (ParameterId::AuthorName, &self.author),
        ];
        for (id, value) in flags {
            if let Some(value) = value {
                params.set(id, value.as_str());
            }
        }
        params
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
