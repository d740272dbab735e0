use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{Conversion, LineConverter, MRBAYES_ID};

const NEXUS_HEADER: &str = "#NEXUS";
const BEGIN_TREES: &str = "Begin trees;";
const END_BLOCK: &str = "End;";
const TREE_RECORD: &str = "tree ";

/// Where the converter currently is with respect to the trees block
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TreesBlock {
    Outside,
    Inside,
}

/// Converts a BEAST 2 .trees file into a MrBayes .t file.
///
/// Only the NEXUS header and the trees block are kept. Inside the trees block,
/// `STATE_` tree names become `rep.`, bracketed branch attributes are removed
/// and the root branch length `:0.0` is dropped.
pub struct TreeConverter {
    attribute_regex: Regex,
}

impl TreeConverter {
    pub fn new() -> Result<Self> {
        Ok(TreeConverter {
            attribute_regex: Regex::new(r"\[[^\[\]]+\]").context("Failed to initialize regex")?,
        })
    }

    /// Rewrite a single line from inside the trees block
    pub fn convert_tree_line(&self, line: &str) -> String {
        let renamed = line.replace("STATE_", "rep.");
        let stripped = self.attribute_regex.replace_all(&renamed, "");
        stripped.replace(":0.0;", ";")
    }
}

impl LineConverter for TreeConverter {
    fn convert<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<Conversion> {
        let mut state = TreesBlock::Outside;
        let mut conversion = Conversion::default();

        for line in reader.lines() {
            let line = line.context("Error reading line from trees file")?;
            conversion.lines_read += 1;

            let trimmed = line.trim();

            if trimmed == NEXUS_HEADER {
                writeln!(&mut writer, "{}\n{}", NEXUS_HEADER, MRBAYES_ID)
                    .context("Error writing header to .t file")?;
                conversion.lines_written += 2;
                continue;
            }

            if trimmed == BEGIN_TREES {
                writeln!(&mut writer, "{}", line).context("Error writing to .t file")?;
                conversion.lines_written += 1;
                state = TreesBlock::Inside;
                continue;
            }

            if state == TreesBlock::Outside {
                continue;
            }

            writeln!(&mut writer, "{}", self.convert_tree_line(&line))
                .context("Error writing tree to .t file")?;
            conversion.lines_written += 1;
            if trimmed.starts_with(TREE_RECORD) {
                conversion.records += 1;
            }

            // Compared against the untrimmed line, so an indented "End;" stays inside the block
            if line == END_BLOCK {
                state = TreesBlock::Outside;
            }
        }

        Ok(conversion)
    }
}
