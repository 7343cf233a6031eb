mod vector;
mod body;

pub use vector::*;
pub use body::*;

#[cfg(test)]
mod vector_tests;
#[cfg(test)]
mod body_tests;
