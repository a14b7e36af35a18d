//! URI and path toolkit with lenient parsing and path algebra.
//!
//! This crate parses, edits and serializes URIs whose schemes may have
//! several colon-separated segments, and hierarchical paths that accept both
//! `/` and `\` as separators. Parsing never fails; malformed input degrades
//! to the closest structured reading.
//!
//! # Overview
//!
//! ```text
//! (scheme-segment ":")* ["//" [user-info "@"] host [":" port]] path ["?" query] ["#" fragment]
//! ```
//!
//! | Type | Role |
//! |------|------|
//! | [`Path`] | Immutable segments with absolute / trailing-separator flags |
//! | [`PathBuilder`] | Editing of paths: append, prepend, file names |
//! | [`Uri`] | Immutable URI value |
//! | [`UriBuilder`] | Editing of URIs |
//! | [`QueryItems`] | Ordered, duplicate-preserving query |
//! | [`PercentCodec`] | Percent decoding of input, encoding of output |
//!
//! # Quick Start
//!
//! ```rust
//! use uri_kit::{Path, Uri};
//!
//! let base = Path::parse("/a/b/c/");
//! assert_eq!(base.resolve(&Path::parse("../../d")).to_string(), "/a/d");
//! assert_eq!(Path::parse("/a/b").relativize(&Path::parse("/a/b/c")).to_string(), "b/c");
//!
//! let uri = Uri::parse("toto:x:y://a:b@www.google.com:80/z/a/b/c?x=y&a=b#fragment");
//! assert_eq!(uri.scheme().as_deref(), Some("toto:x:y"));
//! assert_eq!(uri.authority().as_deref(), Some("a:b@www.google.com:80"));
//! assert_eq!(uri.to_string(), "toto:x:y://a:b@www.google.com:80/z/a/b/c?x=y&a=b#fragment");
//! ```
//!
//! # Builder Pattern
//!
//! ```rust
//! use uri_kit::UriBuilder;
//!
//! let uri = UriBuilder::parse("a/b/c/file.txt?a=b&c=d")
//!     .map_path(|path| path.file_name("titi.tata"))
//!     .scheme("ftp")
//!     .build();
//!
//! assert_eq!(uri.to_string(), "ftp:a/b/c/titi.tata?a=b&c=d");
//! ```
//!
//! # Encoding
//!
//! Path segments, query items and fragments are stored decoded and encoded
//! again on output. The characters `? ' " # % & +` are always escaped;
//! [`Encoding`] toggles whether spaces become `+` and whether non-ASCII
//! characters are percent-escaped.
//!
//! # Features
//!
//! - `serde`: [`Path`] and [`Uri`] serialize as strings
//! - `log`: trace records from the tokenizer through the `log` crate

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod codec;
mod constants;
#[cfg(kani)]
mod kani_impls;
mod log;
mod path;
mod path_builder;
pub mod prelude;
mod query;
mod to_path;
pub mod tokenizer;
mod uri;

pub use builder::UriBuilder;
pub use codec::{Encoding, PercentCodec, decode, encode};
pub use constants::{ALT_PATH_SEPARATOR, ALWAYS_ESCAPED, PATH_SEPARATOR};
pub use path::Path;
pub use path_builder::PathBuilder;
pub use query::{QueryItem, QueryItems};
pub use to_path::{DefaultFilter, Filter, to_resource_path};
pub use uri::Uri;
