//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_kit::prelude::*;
//!
//! let uri = Uri::parse("http://www.foo.bar/a/b/c");
//! assert_eq!(uri.path().file_name(), Some("c"));
//! ```

pub use crate::{
    // Values
    Path, QueryItem, QueryItems, Uri,
    // Builders
    PathBuilder, UriBuilder,
    // Codec
    Encoding, PercentCodec, decode, encode,
    // Resource paths
    DefaultFilter, Filter, to_resource_path,
};
