mod paths;

use anyhow::{Context, Result};
use beast_converter::{LineConverter, LogConverter, TreeConverter};
use clap::Parser;
use std::path::PathBuf;
use utils::now_str;

use crate::paths::{readable_file, writable_file};

fn main() -> Result<()> {
    let args = Cli::parse();

    let trees = TreeConverter::new().context("Unable to create trees converter")?;
    eprintln!(
        "[{}] Converting trees {} to {}",
        now_str(),
        args.trees_file.display(),
        args.t_file.display()
    );
    let conversion = trees
        .convert_file(&args.trees_file, &args.t_file)
        .context("Failed to convert .trees file")?;
    eprintln!("[{}] Trees: {}", now_str(), conversion);

    let log = LogConverter::new().context("Unable to create log converter")?;
    eprintln!(
        "[{}] Converting log {} to {}",
        now_str(),
        args.log_file.display(),
        args.p_file.display()
    );
    let conversion = log
        .convert_file(&args.log_file, &args.p_file)
        .context("Failed to convert .log file")?;
    eprintln!("[{}] Log: {}", now_str(), conversion);

    Ok(())
}

/// Convert BEAST 2 .trees and .log output into MrBayes .t and .p files
#[derive(Parser, Debug)]
#[clap(version)]
struct Cli {
    /// The .trees output from BEAST 2 to convert
    #[clap(value_parser = readable_file)]
    trees_file: PathBuf,

    /// The .log output from BEAST 2 to convert
    #[clap(value_parser = readable_file)]
    log_file: PathBuf,

    /// The .t MrBayes output file to write.
    /// Note that branch rates will be stripped from the BEAST 2 trees during the conversion
    #[clap(value_parser = writable_file)]
    t_file: PathBuf,

    /// The .p MrBayes output file to write.
    /// Note that this file will be minimal, containing only the sample numbers and log likelihoods
    #[clap(value_parser = writable_file)]
    p_file: PathBuf,
}
