use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::chromosome::normalize_chromosome;
use crate::core::header::VcfHeader;
use crate::core::record::VcfRecord;
use crate::parsing::vcf::ParseError;
use crate::partition::{PartitionError, PartitionMode, PartitionNaming};
use crate::utils::validation::validate_partition_key;

/// A partition file produced by [`PartitionWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionFile {
    pub path: PathBuf,
    /// Normalized chromosome, or the group index in count mode
    pub key: String,
    /// Data records written (header excluded)
    pub records: usize,
}

/// An open partition: header already written, records appended in order
struct Sink {
    file: PartitionFile,
    writer: BufWriter<File>,
}

impl Sink {
    fn create(path: PathBuf, key: String, header: &VcfHeader) -> Result<Self, PartitionError> {
        debug!("Opening partition '{}'", path.display());

        let file = File::create(&path).map_err(|source| PartitionError::Io {
            path: path.clone(),
            source,
        })?;
        let mut sink = Self {
            file: PartitionFile {
                path,
                key,
                records: 0,
            },
            writer: BufWriter::new(file),
        };

        header
            .write_to(&mut sink.writer)
            .map_err(|source| sink.io_error(source))?;
        Ok(sink)
    }

    fn write(&mut self, record: &VcfRecord) -> Result<(), PartitionError> {
        writeln!(self.writer, "{record}").map_err(|source| self.io_error(source))?;
        self.file.records += 1;
        Ok(())
    }

    fn close(mut self) -> Result<PartitionFile, PartitionError> {
        self.writer
            .flush()
            .map_err(|source| self.io_error(source))?;
        Ok(self.file)
    }

    fn io_error(&self, source: std::io::Error) -> PartitionError {
        PartitionError::Io {
            path: self.file.path.clone(),
            source,
        }
    }
}

/// Splits a VCF stream into independently valid files.
///
/// In chromosome mode every distinct normalized chromosome gets its own file,
/// whatever order the records arrive in. In count mode records are cut into
/// consecutive files of `n` records; each file is closed as soon as it is full.
/// Files are never reopened, and files written before a failure are left on
/// disk.
#[derive(Debug, Clone)]
pub struct PartitionWriter {
    mode: PartitionMode,
    naming: PartitionNaming,
}

impl PartitionWriter {
    /// # Errors
    ///
    /// Returns `PartitionError::InvalidConfiguration` for a zero record count.
    pub fn new(mode: PartitionMode, naming: PartitionNaming) -> Result<Self, PartitionError> {
        Ok(Self {
            mode: mode.validate()?,
            naming,
        })
    }

    pub fn mode(&self) -> PartitionMode {
        self.mode
    }

    /// Write all records, returning the files created in the order they were
    /// first opened.
    ///
    /// # Errors
    ///
    /// Returns `PartitionError::Io` if a file cannot be created or written,
    /// `PartitionError::Parse` if the input stream yields a bad record, and
    /// `PartitionError::InvalidKey` if a chromosome cannot be used in a file
    /// name.
    pub fn write<I>(
        &self,
        header: &VcfHeader,
        records: I,
    ) -> Result<Vec<PartitionFile>, PartitionError>
    where
        I: IntoIterator<Item = Result<VcfRecord, ParseError>>,
    {
        let files = match self.mode {
            PartitionMode::ByChromosome => self.write_by_chromosome(header, records)?,
            PartitionMode::ByCount(n) => self.write_by_count(header, records, n)?,
        };

        info!(
            "Wrote {} records into {} partition files",
            files.iter().map(|f| f.records).sum::<usize>(),
            files.len()
        );
        Ok(files)
    }

    fn write_by_chromosome<I>(
        &self,
        header: &VcfHeader,
        records: I,
    ) -> Result<Vec<PartitionFile>, PartitionError>
    where
        I: IntoIterator<Item = Result<VcfRecord, ParseError>>,
    {
        // Sinks in first-opened order, plus key -> position in `sinks`
        let mut sinks: Vec<Sink> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for result in records {
            let record = result?;
            let key = normalize_chromosome(record.chromosome());

            let idx = match by_key.get(&key) {
                Some(&idx) => idx,
                None => {
                    validate_partition_key(&key).map_err(|source| PartitionError::InvalidKey {
                        key: key.clone(),
                        source,
                    })?;
                    let path = self.naming.path_for(&key);
                    sinks.push(Sink::create(path, key.clone(), header)?);
                    by_key.insert(key, sinks.len() - 1);
                    sinks.len() - 1
                }
            };

            sinks[idx].write(&record)?;
        }

        sinks.into_iter().map(Sink::close).collect()
    }

    fn write_by_count<I>(
        &self,
        header: &VcfHeader,
        records: I,
        per_file: usize,
    ) -> Result<Vec<PartitionFile>, PartitionError>
    where
        I: IntoIterator<Item = Result<VcfRecord, ParseError>>,
    {
        let mut files = Vec::new();
        let mut current: Option<Sink> = None;

        for (record_index, result) in records.into_iter().enumerate() {
            let record = result?;
            let group = record_index / per_file;

            let sink = match current.take() {
                Some(sink) if sink.file.records < per_file => sink,
                full => {
                    if let Some(full) = full {
                        files.push(full.close()?);
                    }
                    let key = group.to_string();
                    Sink::create(self.naming.path_for(&key), key, header)?
                }
            };

            current.insert(sink).write(&record)?;
        }

        if let Some(sink) = current {
            files.push(sink.close()?);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::vcf::VcfReader;
    use std::io::Cursor;
    use std::path::Path;

    const HEADER: &str = "##fileformat=VCFv4.1\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";

    /// 5 records on chromosome 19 and 3 on Y, interleaved
    fn interleaved_vcf() -> String {
        let mut text = HEADER.to_string();
        for (chrom, pos) in [
            ("19", 100),
            ("19", 200),
            ("Y", 10),
            ("19", 300),
            ("Y", 20),
            ("19", 400),
            ("Y", 30),
            ("19", 500),
        ] {
            text.push_str(&format!("{chrom}\t{pos}\t.\tA\tC\t.\tPASS\t.\n"));
        }
        text
    }

    fn split(dir: &Path, mode: PartitionMode, text: &str) -> Vec<PartitionFile> {
        let reader = VcfReader::new(Cursor::new(text.to_string())).unwrap();
        let header = reader.header().clone();
        let naming = PartitionNaming::with_prefix(dir.join("test_split_01"));
        PartitionWriter::new(mode, naming)
            .unwrap()
            .write(&header, reader)
            .unwrap()
    }

    fn data_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .filter(|l| !l.starts_with('#'))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_split_by_chromosome() {
        let dir = tempfile::tempdir().unwrap();
        let files = split(dir.path(), PartitionMode::ByChromosome, &interleaved_vcf());

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].key, "19");
        assert_eq!(files[0].records, 5);
        assert_eq!(files[1].key, "Y");
        assert_eq!(files[1].records, 3);
        assert_eq!(files[1].path, dir.path().join("test_split_01.Y.vcf"));

        let content = std::fs::read_to_string(&files[1].path).unwrap();
        assert!(content.starts_with(HEADER));
        assert_eq!(
            data_lines(&files[1].path),
            vec![
                "Y\t10\t.\tA\tC\t.\tPASS\t.",
                "Y\t20\t.\tA\tC\t.\tPASS\t.",
                "Y\t30\t.\tA\tC\t.\tPASS\t.",
            ]
        );
    }

    #[test]
    fn test_split_by_chromosome_normalizes_key() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!(
            "{HEADER}chr1\t1\t.\tA\tC\t.\t.\t.\n1\t2\t.\tA\tC\t.\t.\t.\nchrX\t3\t.\tA\tC\t.\t.\t.\n"
        );
        let files = split(dir.path(), PartitionMode::ByChromosome, &text);

        let keys: Vec<&str> = files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "X"]);
        assert_eq!(files[0].records, 2);
    }

    #[test]
    fn test_split_by_count() {
        let dir = tempfile::tempdir().unwrap();
        let files = split(dir.path(), PartitionMode::ByCount(2), &interleaved_vcf());

        assert_eq!(files.len(), 4);
        for (i, file) in files.iter().enumerate() {
            assert_eq!(file.key, i.to_string());
            assert_eq!(file.records, 2);
            // Header is two lines here
            let lines = std::fs::read_to_string(&file.path).unwrap().lines().count();
            assert_eq!(lines, 2 + 2);
        }

        // Raw arrival order, regardless of chromosome
        assert_eq!(
            data_lines(&files[1].path),
            vec!["Y\t10\t.\tA\tC\t.\tPASS\t.", "19\t300\t.\tA\tC\t.\tPASS\t."]
        );
    }

    #[test]
    fn test_split_by_count_short_last_file() {
        let dir = tempfile::tempdir().unwrap();
        let files = split(dir.path(), PartitionMode::ByCount(3), &interleaved_vcf());

        let sizes: Vec<usize> = files.iter().map(|f| f.records).collect();
        assert_eq!(sizes, vec![3, 3, 2]);
        assert_eq!(files[2].path, dir.path().join("test_split_01.2.vcf"));
    }

    #[test]
    fn test_split_empty_stream() {
        let dir = tempfile::tempdir().unwrap();
        assert!(split(dir.path(), PartitionMode::ByChromosome, HEADER).is_empty());
        assert!(split(dir.path(), PartitionMode::ByCount(5), HEADER).is_empty());
    }

    #[test]
    fn test_zero_count_rejected() {
        let result = PartitionWriter::new(
            PartitionMode::ByCount(0),
            PartitionNaming::with_prefix("unused"),
        );
        assert!(matches!(
            result,
            Err(PartitionError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unwritable_directory_is_fatal() {
        let reader = VcfReader::new(Cursor::new(interleaved_vcf())).unwrap();
        let header = reader.header().clone();
        let naming = PartitionNaming::with_prefix("/nonexistent/dir/part");

        let err = PartitionWriter::new(PartitionMode::ByChromosome, naming)
            .unwrap()
            .write(&header, reader)
            .unwrap_err();
        assert!(matches!(err, PartitionError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/part.19.vcf"));
    }

    #[test]
    fn test_unsafe_chromosome_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{HEADER}../escape\t1\t.\tA\tC\t.\t.\t.\n");
        let reader = VcfReader::new(Cursor::new(text)).unwrap();
        let header = reader.header().clone();

        let err = PartitionWriter::new(
            PartitionMode::ByChromosome,
            PartitionNaming::with_prefix(dir.path().join("p")),
        )
        .unwrap()
        .write(&header, reader)
        .unwrap_err();
        assert!(matches!(err, PartitionError::InvalidKey { .. }));
    }
}
