//! Streaming reader for VCF text.
//!
//! The header block (every leading line starting with `#`) is read eagerly when
//! the reader is created; data lines are then parsed lazily through the
//! `Iterator` implementation. Lines are kept verbatim so that writing records
//! back produces the same bytes.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::header::VcfHeader;
use crate::core::record::VcfRecord;
use crate::utils::io::open_input;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid VCF record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Reads a VCF header followed by a stream of records.
///
/// Blank lines are skipped wherever they appear, in the header block as well
/// as between records, and `\r\n` terminators are read as `\n`. The parsed
/// header therefore does not preserve the exact bytes of the input; code that
/// needs them (such as the partition joiner) reads the raw block itself.
pub struct VcfReader<R> {
    reader: R,
    header: VcfHeader,
    /// First data line, consumed while looking for the end of the header
    pending: Option<(usize, String)>,
    line_num: usize,
    buf: String,
}

impl VcfReader<Box<dyn BufRead>> {
    /// Open a VCF file (plain or gzip/BGZF compressed). `-` reads stdin.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Open` if the file cannot be opened, or
    /// `ParseError::Io` if reading the header fails.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        let reader = open_input(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(reader)
    }
}

impl<R: BufRead> VcfReader<R> {
    /// Wrap a buffered reader and consume the header block.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if reading fails.
    pub fn new(reader: R) -> Result<Self, ParseError> {
        let mut vcf = Self {
            reader,
            header: VcfHeader::default(),
            pending: None,
            line_num: 0,
            buf: String::new(),
        };

        let mut lines = Vec::new();
        while let Some(line) = vcf.next_line()? {
            if line.starts_with('#') {
                lines.push(line);
            } else if !line.is_empty() {
                vcf.pending = Some((vcf.line_num, line));
                break;
            }
        }

        vcf.header = VcfHeader::new(lines);
        Ok(vcf)
    }

    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Line number of the last line read (1-based)
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Read the next line without its line terminator
    fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_num += 1;

        let line = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(Some(line.to_string()))
    }

    fn next_record(&mut self) -> Result<Option<VcfRecord>, ParseError> {
        if let Some((line_num, line)) = self.pending.take() {
            return VcfRecord::parse(&line, line_num).map(Some);
        }

        while let Some(line) = self.next_line()? {
            if line.is_empty() {
                continue;
            }
            return VcfRecord::parse(&line, self.line_num).map(Some);
        }

        Ok(None)
    }
}

impl<R: BufRead> Iterator for VcfReader<R> {
    type Item = Result<VcfRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
