//! Attributed document model
//!
//! The universal input shape handed over by the transport adapters: a tree of
//! [`AttributedNode`]s whose leaves are [`Scalar`]s. The domain never assumes
//! a field's cardinality; `0..N` fields are read through
//! [`AttributedNode::plural`], which applies [`to_sequence`].

pub mod node;
pub mod plural;

pub use node::{ATTRIBUTE_PREFIX, AttributedNode, NodeValue, Scalar, TEXT_KEY};
pub use plural::{OneOrMany, to_sequence};
