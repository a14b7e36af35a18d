//! Longest-prefix-match tables for `uri-kit` paths.
//!
//! This crate maps path prefixes to values and answers "which registered
//! prefix is the longest prefix of this path". It includes:
//!
//! - **Prefix table**: [`PrefixTable`], a sorted table with binary-search
//!   lookups
//! - **Shared registry**: [`PrefixRegistry`], the same table behind a mutex
//! - **Extension registry**: [`ExtensionRegistry`], sorted extension lists
//!   per prefix
//!
//! # Overview
//!
//! Prefixes are stored in canonical form, bounded by the delimiter on both
//! ends:
//!
//! ```text
//! "a/b"  -> "/a/b/"
//! ""     -> "/"
//! ```
//!
//! A prefix only matches whole segments: `/ab/` is not a prefix of `/abc/`.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_kit::Uri;
//! use uri_kit_registry::PrefixTable;
//!
//! let mut table = PrefixTable::new();
//! table.add("/", "root").unwrap();
//! table.add("/resources/img/", "images").unwrap();
//!
//! assert_eq!(table.nearest_value("/resources/img/toto"), Some(&"images"));
//! assert_eq!(table.nearest_value("/resources/css/main.css"), Some(&"root"));
//!
//! let uri = Uri::parse("http://host/resources/img/logo.png?size=2");
//! assert_eq!(table.nearest_for_uri(&uri).map(|e| *e.value()), Some("images"));
//! ```
//!
//! # Errors
//!
//! Registering a prefix twice is reported, not overwritten:
//!
//! ```rust
//! use uri_kit_registry::PrefixTable;
//!
//! let mut table = PrefixTable::new();
//! table.add("a", 1).unwrap();
//! let err = table.add("/a/", 2).unwrap_err();
//! assert!(err.is_already_registered());
//! assert_eq!(table.exact_value("a"), Some(&1));
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod extension;
mod log;
mod prefix_table;
mod registry;

pub use error::RegistryError;
pub use extension::ExtensionRegistry;
pub use prefix_table::{DEFAULT_DELIMITER, Entry, PrefixTable};
pub use registry::PrefixRegistry;
