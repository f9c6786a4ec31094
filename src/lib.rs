#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
//! Construction, decomposition and percent-encoding of URIs as per IETF
//! [RFC 3986], with the [RFC 5987] extension for attribute values.
//!
//! The two entry points are [`Uri`], an immutable parsed URI reference
//! with raw and decoded component getters, and [`UriBuilder`], a mutable
//! aggregate that keeps raw and decoded forms of every component side by
//! side: unmodified components serialize byte for byte, mutated ones are
//! re-encoded under a configurable [`EncodingPolicy`].
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [RFC 5987]: https://datatracker.ietf.org/doc/html/rfc5987/
//!
//! # Examples
//!
//! ```
//! use uri_forge::UriBuilder;
//!
//! let mut builder = UriBuilder::parse("http://u:p@Example.COM:8080/a/./b/../c?x=1&y=2#frag")?;
//! builder.optimize();
//! assert_eq!(
//!     builder.to_string(),
//!     "http://u:p@example.com:8080/a/c?x=1&y=2#frag"
//! );
//! # Ok::<_, uri_forge::ParseError>(())
//! ```

pub mod component;
pub mod encoding;
pub mod error;
pub mod path;
pub mod query;
pub mod tokenizer;

mod builder;
mod ip;
mod uri;

pub use builder::{EncodingPolicy, UriBuilder};
pub use error::{BuildError, ParseError};
pub use query::Param;
pub use uri::Uri;
