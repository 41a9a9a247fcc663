//! Error types for hierarchy construction and path-scoped operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HierarchyError {
    /// The mesh/parent arrays handed over by the import stage do not describe a tree.
    #[error("invalid import: {reason}")]
    InvalidImport { reason: String },

    /// Unknown anchor rule name, or a rule used where it has no meaning.
    #[error("invalid anchor policy: {reason}")]
    InvalidPolicy { reason: String },

    /// A path segment does not name an existing child.
    #[error("path segment {segment} out of range at node {node} ({children} children)")]
    InvalidPath {
        node: usize,
        segment: usize,
        children: usize,
    },

    /// A control point index past the end of the current control point list.
    #[error("control point {index} out of range ({count} available)")]
    JointOutOfRange { index: usize, count: usize },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl HierarchyError {
    pub(crate) fn import(reason: impl Into<String>) -> Self {
        Self::InvalidImport {
            reason: reason.into(),
        }
    }

    pub(crate) fn policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
