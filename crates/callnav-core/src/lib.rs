//! # callnav-core: Span location for Python call sites
//!
//! Pure functions from document text to ordered, half-open character spans,
//! plus the drivers that turn those spans into editor selections:
//!
//! - **[`span`]**: `Span`, the half-open `[start, end)` char interval
//! - **[`position`]**: parser `Position`s and the `LineTable` prefix sums
//! - **[`document`]**: `Document` snapshots with byte/char conversion
//! - **[`scan`]**: invocation, call-parenthesis, and scope-name scanners
//! - **[`syntax`]**: the `CallParser` seam and its tree-sitter-python backend
//! - **[`cache`]**: bounded LRU cache of resolved argument spans
//! - **[`resolve`]**: the argument boundary resolver
//! - **[`navigate`]**: next/previous span selection by binary search
//! - **[`host`]**: narrow traits the host editor implements
//! - **[`expand`]**: grow a selection until a predicate stops holding
//! - **[`word`]**: word-character classification
//! - **[`commands`]**: user-facing commands wired to the host traits
//! - **[`config`]**: TOML configuration
//!
//! Nothing here touches a real editor. Hosts implement [`host::TextSource`],
//! [`host::CommandSink`], [`host::Viewport`], and [`host::EditableText`]; the
//! `callnav-editor` crate provides an in-memory implementation.

pub mod cache;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod expand;
pub mod host;
pub mod navigate;
pub mod position;
pub mod resolve;
pub mod scan;
pub mod span;
pub mod syntax;
pub mod word;

pub use commands::{Navigator, Shape, Target, unpack_tuple_to_one};
pub use config::Config;
pub use document::Document;
pub use error::{Error, Result};
pub use navigate::Direction;
pub use resolve::ArgumentResolver;
pub use span::Span;
