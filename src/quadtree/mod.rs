mod node;
mod node_pool;
mod traversal;
mod tree;

pub use node::*;
pub use node_pool::*;
pub use traversal::*;
pub use tree::*;

#[cfg(test)]
mod node_pool_tests;
#[cfg(test)]
mod traversal_tests;
