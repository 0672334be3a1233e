use std::fmt;

use crate::parsing::vcf::ParseError;

/// Number of fixed columns in a VCF data line (CHROM through INFO)
pub const MIN_COLUMNS: usize = 8;

const CHROM_COL: usize = 0;
const POS_COL: usize = 1;
const INFO_COL: usize = 7;

/// Placeholder for an empty VCF column
const MISSING: &str = ".";

/// A single VCF data line.
///
/// The tab-separated columns are kept verbatim, so a record that was never
/// modified writes back byte-for-byte. Only the INFO column is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecord {
    columns: Vec<String>,
    position: u64,
    info: Vec<(String, Option<String>)>,
}

impl VcfRecord {
    /// Parse a data line (without the trailing newline).
    ///
    /// `line_num` is only used for error context.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidRecord` if the line has fewer than eight
    /// columns, an empty CHROM, or a POS that is not a non-negative integer.
    pub fn parse(line: &str, line_num: usize) -> Result<Self, ParseError> {
        let columns: Vec<String> = line.split('\t').map(str::to_string).collect();

        if columns.len() < MIN_COLUMNS {
            return Err(ParseError::InvalidRecord {
                line: line_num,
                reason: format!(
                    "expected at least {MIN_COLUMNS} columns, found {}",
                    columns.len()
                ),
            });
        }

        if columns[CHROM_COL].is_empty() {
            return Err(ParseError::InvalidRecord {
                line: line_num,
                reason: "empty CHROM column".to_string(),
            });
        }

        let position = columns[POS_COL]
            .parse()
            .map_err(|_| ParseError::InvalidRecord {
                line: line_num,
                reason: format!("invalid POS '{}'", columns[POS_COL]),
            })?;

        let info = parse_info(&columns[INFO_COL]);

        Ok(Self {
            columns,
            position,
            info,
        })
    }

    /// Chromosome exactly as written in the file
    pub fn chromosome(&self) -> &str {
        &self.columns[CHROM_COL]
    }

    /// 1-based position
    pub fn position(&self) -> u64 {
        self.position
    }

    /// INFO fields in file order; flags have no value
    pub fn info(&self) -> &[(String, Option<String>)] {
        &self.info
    }

    /// Value of an INFO field. Flags yield `Some("")`.
    pub fn info_value(&self, key: &str) -> Option<&str> {
        self.info
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// Set an INFO field, overwriting it in place if present or appending otherwise
    pub fn set_info(&mut self, key: &str, value: impl Into<String>) {
        let value = Some(value.into());

        match self.info.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.info.push((key.to_string(), value)),
        }

        self.columns[INFO_COL] = render_info(&self.info);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl fmt::Display for VcfRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns.join("\t"))
    }
}

fn parse_info(column: &str) -> Vec<(String, Option<String>)> {
    if column == MISSING {
        return Vec::new();
    }

    column
        .split(';')
        .filter(|field| !field.is_empty())
        .map(|field| match field.split_once('=') {
            Some((key, value)) => (key.to_string(), Some(value.to_string())),
            None => (field.to_string(), None),
        })
        .collect()
}

fn render_info(info: &[(String, Option<String>)]) -> String {
    if info.is_empty() {
        return MISSING.to_string();
    }

    info.iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{key}={value}"),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join(";")
}
