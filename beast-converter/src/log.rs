use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use regex::Regex;

use crate::{Conversion, LineConverter, MRBAYES_ID};

const P_HEADER: &str = "Gen\tLnL";

/// Converts a BEAST 2 .log file into a minimal MrBayes .p file,
/// keeping only the sample number and the log-likelihood of every sample.
///
/// Any line that is neither a comment nor a sample is taken to be the header row
/// and replaced by the .p header. This happens for every such line.
pub struct LogConverter {
    sample_regex: Regex,
}

impl LogConverter {
    pub fn new() -> Result<Self> {
        Ok(LogConverter {
            sample_regex: Regex::new(r"^(\d+)\t(-\d+\.\d+)\t")
                .context("Failed to initialize regex")?,
        })
    }
}

impl LineConverter for LogConverter {
    fn convert<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<Conversion> {
        let mut conversion = Conversion::default();

        for line in reader.lines() {
            let line = line.context("Error reading line from log file")?;
            conversion.lines_read += 1;

            if line.starts_with('#') {
                continue;
            }

            match self.sample_regex.captures(&line) {
                None => {
                    writeln!(&mut writer, "{}\n{}", MRBAYES_ID, P_HEADER)
                        .context("Error writing header to .p file")?;
                    conversion.lines_written += 2;
                }
                Some(caps) => {
                    writeln!(&mut writer, "{}\t{}", &caps[1], &caps[2])
                        .context("Error writing sample to .p file")?;
                    conversion.lines_written += 1;
                    conversion.records += 1;
                }
            }
        }

        Ok(conversion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn convert_str(input: &str) -> (String, Conversion) {
        let converter = LogConverter::new().unwrap();
        let mut out = Vec::new();
        let conversion = converter.convert(input.as_bytes(), &mut out).unwrap();

        (String::from_utf8(out).unwrap(), conversion)
    }

    #[test]
    fn test_comment_header_and_sample() {
        let (got, conversion) = convert_str(
            "# Generated by BEAST v2.6.7\nSample\tposterior\tlikelihood\n5\t-123.456789\t-120.0\n",
        );

        assert_eq!(got, "[ID: 0123456789]\nGen\tLnL\n5\t-123.456789\n");
        assert_eq!(
            conversion,
            Conversion {
                lines_read: 3,
                lines_written: 3,
                records: 1
            }
        );
    }

    #[test]
    fn test_values_are_copied_verbatim() {
        let (got, _) = convert_str(
            "Sample\tlikelihood\tprior\n0\t-00012.5000\t-3.2\n1000\t-11.25\t-3.1\t0.7\n",
        );

        assert_eq!(
            got,
            "[ID: 0123456789]\nGen\tLnL\n0\t-00012.5000\n1000\t-11.25\n"
        );
    }

    #[test]
    fn test_reconverting_p_file_rewraps_every_line() {
        let (got, conversion) = convert_str("[ID: 0123456789]\nGen\tLnL\n5\t-123.456789\n");

        assert_eq!(
            got,
            "[ID: 0123456789]\nGen\tLnL\n[ID: 0123456789]\nGen\tLnL\n[ID: 0123456789]\nGen\tLnL\n"
        );
        assert_eq!(conversion.records, 0);
    }

    #[test]
    fn test_unmatched_lines_repeat_header() {
        // Positive, integral and trailing-column-less likelihoods do not match
        let (got, _) = convert_str("1\t12.5\t0\n2\t-12\t0\n3\t-12.5\n\n4\t-1.0\t0\n");

        assert_eq!(
            got,
            "[ID: 0123456789]\nGen\tLnL\n".repeat(4) + "4\t-1.0\n"
        );
    }

    #[test]
    fn test_comments_only() {
        let (got, conversion) = convert_str("#a\n# b\n#\n");

        assert_eq!(got, "");
        assert_eq!(conversion.lines_read, 3);
        assert_eq!(conversion.lines_written, 0);
    }

    #[test]
    fn test_indented_comment_is_not_a_comment() {
        let (got, _) = convert_str(" # not a comment\n");

        assert_eq!(got, "[ID: 0123456789]\nGen\tLnL\n");
    }

    #[test]
    fn test_write_error_on_header() {
        let converter = LogConverter::new().unwrap();

        let err = converter
            .convert("Sample\tlikelihood\n".as_bytes(), FullDisk)
            .unwrap_err();

        assert_eq!(err.to_string(), "Error writing header to .p file");
        assert!(format!("{:#}", err).ends_with("disk full"));
    }

    #[test]
    fn test_write_error_on_sample() {
        let converter = LogConverter::new().unwrap();

        let err = converter
            .convert("# comment\n7\t-1.5\t0\n".as_bytes(), FullDisk)
            .unwrap_err();

        assert_eq!(err.to_string(), "Error writing sample to .p file");
    }

    #[test]
    fn test_last_line_without_terminator() {
        let (got, _) = convert_str("Sample\tlikelihood\tprior\n3\t-7.25\t-1.0");

        assert_eq!(got, "[ID: 0123456789]\nGen\tLnL\n3\t-7.25\n");
    }
}
