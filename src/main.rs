mod cli;
mod error;
mod fmt;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "xlsx")]
mod spreadsheet;
#[cfg(feature = "pdf")]
mod statement;
mod ynab;

use clap::Parser;
use colored::Colorize;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::convert::run(&cli.file) {
        eprintln!("{}", e.to_string().red());
        std::process::exit(if e.is_usage() { 2 } else { 1 });
    }
}
