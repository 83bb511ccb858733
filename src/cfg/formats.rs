//! Output formats for derivation trees
//!
//! Rendering is a downstream concern: the engine hands over a [`ParseNode`](super::tree::ParseNode)
//! and a [`Formatter`] turns it into text. Every built-in format works from the
//! [`TreeSnapshot`](super::snapshot::TreeSnapshot) of the tree.
//!
//! - `dot`: Graphviz source, one `nodeN` per tree node in depth-first order
//! - `treeviz`: one line per node with box-drawing connectors
//! - `tag`: XML-like nested tags
//! - `bracket`: `S(A(a), B(epsilon))`
//! - `json` / `yaml`: the serialized snapshot

pub mod bracket;
pub mod dot;
pub mod registry;
pub mod serialized;
pub mod tag;
pub mod treeviz;

pub use bracket::BracketFormatter;
pub use dot::{to_dot_str, DotFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use tag::{serialize_tree as serialize_tag, TagFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
