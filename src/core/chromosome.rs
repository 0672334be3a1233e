/// Prefixes stripped from chromosome names, longest first so `chromosome1`
/// does not leave `osome1` behind.
const CHROMOSOME_PREFIXES: [&str; 3] = ["chromosome", "chromo", "chr"];

/// Normalize a chromosome name so that UCSC and NCBI spellings share a key.
///
/// Surrounding whitespace is trimmed. Leading `chr`/`chromo`/`chromosome`
/// prefixes, and any whitespace they expose, are removed (case-insensitive)
/// as long as something remains, and the result is upper-cased:
///
/// ```
/// use varsift::core::chromosome::normalize_chromosome;
///
/// assert_eq!(normalize_chromosome("chr1"), "1");
/// assert_eq!(normalize_chromosome("Chr1"), "1");
/// assert_eq!(normalize_chromosome("x"), "X");
/// assert_eq!(normalize_chromosome("chrMT"), "MT");
/// ```
#[must_use]
pub fn normalize_chromosome(name: &str) -> String {
    let mut rest = name.trim();

    while let Some(stripped) = strip_prefix(rest) {
        let stripped = stripped.trim_start();
        if stripped.is_empty() {
            break;
        }
        rest = stripped;
    }

    rest.to_ascii_uppercase()
}

fn strip_prefix(name: &str) -> Option<&str> {
    CHROMOSOME_PREFIXES.iter().find_map(|prefix| {
        let head = name.get(..prefix.len())?;
        if head.eq_ignore_ascii_case(prefix) {
            Some(&name[prefix.len()..])
        } else {
            None
        }
    })
}
