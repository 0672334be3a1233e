use std::fmt;
use std::io::{self, Write};

/// Prefix of the column header line that ends a VCF header block
pub const COLUMN_HEADER_PREFIX: &str = "#CHROM";

const INFO_PREFIX: &str = "##INFO=<";

/// Declaration of an INFO field, rendered as a `##INFO=<...>` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoDeclaration {
    pub id: String,
    /// VCF `Number` (e.g. `1`, `A`, `.`)
    pub number: String,
    /// VCF `Type` (e.g. `String`, `Integer`)
    pub kind: String,
    pub description: String,
}

impl InfoDeclaration {
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        kind: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            kind: kind.into(),
            description: description.into(),
        }
    }

    /// Render as a header line
    #[must_use]
    pub fn to_header_line(&self) -> String {
        format!(
            "{INFO_PREFIX}ID={},Number={},Type={},Description=\"{}\">",
            self.id, self.number, self.kind, self.description
        )
    }
}

/// The header block of a VCF file, kept verbatim line by line.
///
/// Includes the `##` meta lines and the `#CHROM` column line. Lines are stored
/// without their terminating newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VcfHeader {
    lines: Vec<String>,
}

impl VcfHeader {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sample names from the `#CHROM` line (columns after FORMAT)
    pub fn sample_names(&self) -> Vec<&str> {
        self.column_line()
            .map(|line| line.split('\t').skip(9).collect())
            .unwrap_or_default()
    }

    /// Check whether an INFO field with this ID is declared
    pub fn has_info(&self, id: &str) -> bool {
        self.info_line_index(id).is_some()
    }

    /// Declare an INFO field.
    ///
    /// A declaration with the same ID is replaced in place; otherwise the line
    /// goes right before the `#CHROM` line (or last, if there is none).
    pub fn add_info(&mut self, declaration: &InfoDeclaration) {
        let line = declaration.to_header_line();

        if let Some(idx) = self.info_line_index(&declaration.id) {
            self.lines[idx] = line;
            return;
        }

        match self
            .lines
            .iter()
            .position(|l| l.starts_with(COLUMN_HEADER_PREFIX))
        {
            Some(idx) => self.lines.insert(idx, line),
            None => self.lines.push(line),
        }
    }

    /// Write every header line followed by a newline
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }

    fn column_line(&self) -> Option<&str> {
        self.lines
            .iter()
            .rev()
            .find(|l| l.starts_with(COLUMN_HEADER_PREFIX))
            .map(String::as_str)
    }

    fn info_line_index(&self, id: &str) -> Option<usize> {
        self.lines.iter().position(|line| {
            line.strip_prefix(INFO_PREFIX)
                .and_then(|rest| rest.strip_prefix("ID="))
                .and_then(|rest| rest.split([',', '>']).next())
                .is_some_and(|found| found == id)
        })
    }
}

impl fmt::Display for VcfHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
