use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::header::VcfHeader;
use crate::core::record::VcfRecord;
use crate::parsing::vcf::{ParseError, VcfReader};
use crate::utils::io::open_input;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("No partition files to join")]
    EmptyInput,

    #[error(
        "Header of '{}' differs from header of '{}'; parts must come from the same file",
        path.display(),
        expected_from.display()
    )]
    HeaderMismatch {
        path: PathBuf,
        expected_from: PathBuf,
    },

    #[error("Failed to read partition '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to write joined output: {0}")]
    Io(#[from] std::io::Error),
}

/// Reassembles partition files into a single stream
pub struct PartitionJoiner;

impl PartitionJoiner {
    /// Check the parts and open them as one stream.
    ///
    /// Every header is compared byte for byte (line terminators and blank
    /// lines included) with the first one before anything is
    /// returned, so a mismatch never produces partial output. Files are read
    /// in exactly the order given; no sorting is applied.
    ///
    /// # Errors
    ///
    /// Returns `JoinError::EmptyInput` for an empty list,
    /// `JoinError::HeaderMismatch` if any header differs, and
    /// `JoinError::Read` if a part cannot be opened or read.
    pub fn open(paths: &[PathBuf]) -> Result<JoinedStream, JoinError> {
        let (first, rest) = paths.split_first().ok_or(JoinError::EmptyInput)?;
        let expected = read_raw_header(first)?;

        for path in rest {
            if read_raw_header(path)? != expected {
                return Err(JoinError::HeaderMismatch {
                    path: path.clone(),
                    expected_from: first.clone(),
                });
            }
        }

        debug!("Joining {} partition files", paths.len());
        Ok(JoinedStream {
            header: read_header(first)?,
            pending: paths.iter().cloned().collect(),
            current: None,
        })
    }
}

fn read_header(path: &Path) -> Result<VcfHeader, JoinError> {
    open_part(path).map(|reader| reader.header().clone())
}

/// Leading header block exactly as stored: `#` lines and blank lines with
/// their terminators, up to the first data line.
fn read_raw_header(path: &Path) -> Result<Vec<u8>, JoinError> {
    let read_error = |source| JoinError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = open_input(path).map_err(|source| {
        read_error(ParseError::Open {
            path: path.to_path_buf(),
            source,
        })
    })?;

    let mut raw = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader
            .read_until(b'\n', &mut line)
            .map_err(|e| read_error(ParseError::Io(e)))?
            == 0
        {
            break;
        }

        let blank = line.iter().all(|&b| b == b'\n' || b == b'\r');
        if !blank && line.first() != Some(&b'#') {
            break;
        }
        raw.extend_from_slice(&line);
    }
    Ok(raw)
}

fn open_part(path: &Path) -> Result<VcfReader<Box<dyn BufRead>>, JoinError> {
    VcfReader::from_path(path).map_err(|source| JoinError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The shared header followed by the records of every part, in order
pub struct JoinedStream {
    header: VcfHeader,
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, VcfReader<Box<dyn BufRead>>)>,
}

impl JoinedStream {
    /// Header shared by all parts
    pub fn header(&self) -> &VcfHeader {
        &self.header
    }

    /// Write the header once, then every record. Returns the record count.
    ///
    /// # Errors
    ///
    /// Returns `JoinError::Read` if a part fails to read and `JoinError::Io`
    /// if writing fails.
    pub fn write_to<W: Write>(mut self, out: &mut W) -> Result<usize, JoinError> {
        self.header.write_to(out)?;

        let mut count = 0;
        for record in self.by_ref() {
            writeln!(out, "{}", record?)?;
            count += 1;
        }
        out.flush()?;

        info!("Joined {count} records");
        Ok(count)
    }

    fn next_record(&mut self) -> Result<Option<VcfRecord>, JoinError> {
        loop {
            if let Some((path, reader)) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(record)) => return Ok(Some(record)),
                    Some(Err(source)) => {
                        return Err(JoinError::Read {
                            path: path.clone(),
                            source,
                        })
                    }
                    None => self.current = None,
                }
            }

            let Some(path) = self.pending.pop_front() else {
                return Ok(None);
            };
            debug!("Reading partition '{}'", path.display());
            let reader = open_part(&path)?;
            self.current = Some((path, reader));
        }
    }
}

impl Iterator for JoinedStream {
    type Item = Result<VcfRecord, JoinError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.1\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    fn write_part(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_join_in_given_order() {
        let dir = tempfile::tempdir().unwrap();
        let y = write_part(dir.path(), "p.Y.vcf", &format!("{HEADER}Y\t1\t.\tA\tC\t.\t.\t.\n"));
        let c19 = write_part(
            dir.path(),
            "p.19.vcf",
            &format!("{HEADER}19\t5\t.\tA\tC\t.\t.\t.\n19\t9\t.\tA\tC\t.\t.\t.\n"),
        );

        let mut out = Vec::new();
        let count = PartitionJoiner::open(&[y, c19])
            .unwrap()
            .write_to(&mut out)
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!(
                "{HEADER}Y\t1\t.\tA\tC\t.\t.\t.\n19\t5\t.\tA\tC\t.\t.\t.\n19\t9\t.\tA\tC\t.\t.\t.\n"
            )
        );
    }

    #[test]
    fn test_join_streams_records() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_part(dir.path(), "a.vcf", &format!("{HEADER}1\t1\t.\tA\tC\t.\t.\t.\n"));
        let empty = write_part(dir.path(), "empty.vcf", HEADER);
        let b = write_part(dir.path(), "b.vcf", &format!("{HEADER}2\t2\t.\tA\tC\t.\t.\t.\n"));

        let stream = PartitionJoiner::open(&[a, empty, b]).unwrap();
        assert_eq!(stream.header().lines().len(), 2);

        let positions: Vec<u64> = stream.map(|r| r.unwrap().position()).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[test]
    fn test_join_empty_list() {
        assert!(matches!(
            PartitionJoiner::open(&[]),
            Err(JoinError::EmptyInput)
        ));
    }

    #[test]
    fn test_join_header_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_part(dir.path(), "a.vcf", &format!("{HEADER}1\t1\t.\tA\tC\t.\t.\t.\n"));
        let altered = HEADER.replace("VCFv4.1", "VCFv4.2");
        let b = write_part(dir.path(), "b.vcf", &format!("{altered}2\t2\t.\tA\tC\t.\t.\t.\n"));

        match PartitionJoiner::open(&[a.clone(), b.clone()]) {
            Err(JoinError::HeaderMismatch {
                path,
                expected_from,
            }) => {
                assert_eq!(path, b);
                assert_eq!(expected_from, a);
            }
            Err(other) => panic!("expected header mismatch, got {other}"),
            Ok(_) => panic!("expected header mismatch"),
        }
    }

    fn assert_mismatch(a_header: &str, b_header: &str) {
        let dir = tempfile::tempdir().unwrap();
        let a = write_part(dir.path(), "a.vcf", &format!("{a_header}1\t1\t.\tA\tC\t.\t.\t.\n"));
        let b = write_part(dir.path(), "b.vcf", &format!("{b_header}2\t2\t.\tA\tC\t.\t.\t.\n"));

        assert!(matches!(
            PartitionJoiner::open(&[a, b]),
            Err(JoinError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_join_header_line_endings_differ() {
        assert_mismatch(HEADER, &HEADER.replace('\n', "\r\n"));
    }

    #[test]
    fn test_join_header_blank_line_differs() {
        let with_blank = HEADER.replacen('\n', "\n\n", 1);
        assert_mismatch(HEADER, &with_blank);
        assert_mismatch(HEADER, &format!("{HEADER}\n"));
    }

    #[test]
    fn test_join_identical_crlf_headers() {
        let dir = tempfile::tempdir().unwrap();
        let crlf = HEADER.replace('\n', "\r\n");
        let a = write_part(dir.path(), "a.vcf", &format!("{crlf}1\t1\t.\tA\tC\t.\t.\t.\r\n"));
        let b = write_part(dir.path(), "b.vcf", &crlf);

        let mut out = Vec::new();
        let count = PartitionJoiner::open(&[a, b])
            .unwrap()
            .write_to(&mut out)
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_join_missing_part() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_part(dir.path(), "a.vcf", HEADER);
        let missing = dir.path().join("missing.vcf");

        let err = PartitionJoiner::open(&[a, missing]).err().unwrap();
        assert!(matches!(err, JoinError::Read { .. }));
        assert!(err.to_string().contains("missing.vcf"));
    }
}
