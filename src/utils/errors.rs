use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or querying a quad tree.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadTreeError {
    /// Two bodies could not be pulled apart inside their node, even after every build attempt.
    DegeneratePlacement { attempts: usize },
    /// A node handle from an earlier build was used after the pool was reset.
    StaleNode { handle_epoch: u64, pool_epoch: u64 },
    /// A node handle points outside of the active part of the pool.
    InvalidNode(usize),
    /// A body index is outside of the body slice.
    UnknownBody(usize),
    /// Indicates settings that cannot drive a simulation (e.g., non-positive theta).
    InvalidSettings(String),
}

impl fmt::Display for QuadTreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuadTreeError::DegeneratePlacement { attempts } => write!(
                f,
                "Could not insert bodies: not enough tree precision after {} attempts",
                attempts
            ),
            QuadTreeError::StaleNode { handle_epoch, pool_epoch } => write!(
                f,
                "Node handle from build {} used after rebuild {}",
                handle_epoch, pool_epoch
            ),
            QuadTreeError::InvalidNode(index) => write!(f, "Invalid node index {}", index),
            QuadTreeError::UnknownBody(index) => write!(f, "Unknown body index {}", index),
            QuadTreeError::InvalidSettings(msg) => write!(f, "Invalid settings: {}", msg),
        }
    }
}

impl Error for QuadTreeError {}
