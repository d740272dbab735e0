use std::fs::{self, File};
use std::path::{self, PathBuf};

use anyhow::{Result, anyhow, bail};

/// Parse an existing, readable file and resolve it to its canonical path
pub fn readable_file(arg: &str) -> Result<PathBuf> {
    let pb = PathBuf::from(arg);

    if !pb.exists() {
        bail!("File \"{}\" does not exist", pb.display());
    }
    if pb.is_dir() {
        bail!("\"{}\" is a directory", pb.display());
    }

    File::open(&pb).map_err(|e| anyhow!("File \"{}\" is not readable: {}", pb.display(), e))?;

    fs::canonicalize(&pb).map_err(|e| anyhow!("Unable to resolve \"{}\": {}", pb.display(), e))
}

/// Parse an output file path and make it absolute.
/// The file does not have to exist yet, but if it does it may not be read-only
pub fn writable_file(arg: &str) -> Result<PathBuf> {
    let pb = PathBuf::from(arg);

    if pb.is_dir() {
        bail!("\"{}\" is a directory", pb.display());
    }

    if pb.exists() {
        let metadata = fs::metadata(&pb)
            .map_err(|e| anyhow!("Unable to read metadata of \"{}\": {}", pb.display(), e))?;
        if metadata.permissions().readonly() {
            bail!("File \"{}\" is not writable", pb.display());
        }
    }

    path::absolute(&pb).map_err(|e| anyhow!("Unable to resolve \"{}\": {}", pb.display(), e))
}
