//! GWAS catalog loading and position lookup.
//!
//! The catalog is loaded once into a [`CatalogIndex`](index::CatalogIndex) keyed by
//! normalized chromosome and exact position. Lookups return every
//! [`CatalogEntry`](entry::CatalogEntry) at that key in the order the entries
//! appeared in the database file.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use varsift::catalog::index::CatalogIndex;
//!
//! let catalog = CatalogIndex::load(Path::new("gwascatalog.txt")).unwrap();
//!
//! // "chr1" and "1" share a key
//! for entry in catalog.lookup("chr1", 1_000_000) {
//!     println!("{}", entry.trait_code());
//! }
//! ```
//!
//! ## Loading policy
//!
//! Loading is best-effort: malformed lines are logged at debug level, counted
//! and skipped. Only failing to open or read the file is an error.

pub mod entry;
pub mod index;
