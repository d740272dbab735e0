use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use utils::{open_read, open_write};

pub mod log;
pub mod trees;

pub use log::LogConverter;
pub use trees::{TreeConverter, TreesBlock};

/// Placeholder ID line MrBayes expects at the top of its .t and .p files
pub const MRBAYES_ID: &str = "[ID: 0123456789]";

/// Line counts of a single conversion, used for progress reporting
#[derive(PartialEq, Eq, Debug, Default, Clone, Copy)]
pub struct Conversion {
    pub lines_read: usize,
    pub lines_written: usize,
    /// Tree records (`tree ...` lines) or log samples, depending on the converter
    pub records: usize,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} lines, wrote {} lines ({} records)",
            self.lines_read, self.lines_written, self.records
        )
    }
}

/// A line-by-line rewrite of a BEAST 2 output file into its MrBayes counterpart
pub trait LineConverter {
    /// Stream all lines of `reader` through the converter into `writer`.
    /// Every written line ends with `\n`, whatever terminator (if any) the input line had
    fn convert<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<Conversion>;

    /// Convert the file at `input` into a new (or truncated) file at `output`
    fn convert_file(&self, input: &PathBuf, output: &PathBuf) -> Result<Conversion> {
        let reader = open_read(input)?;
        let mut writer = open_write(output)?;

        let conversion = self.convert(reader, &mut writer).with_context(|| {
            format!(
                "Error converting \"{}\" into \"{}\"",
                input.display(),
                output.display()
            )
        })?;

        writer
            .flush()
            .with_context(|| format!("Error flushing output file \"{}\"", output.display()))?;

        Ok(conversion)
    }
}
