pub mod convert;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "convert",
    version,
    about = "Convert an Argenta export (.xlsx) or Mastercard statement (.pdf) into a YNAB 4 import CSV."
)]
pub struct Cli {
    /// Path to the .xlsx account export or .pdf card statement
    pub file: PathBuf,
}
