pub mod errors;
pub mod constants;
pub mod settings;
pub mod random;

pub use errors::*;
pub use constants::*;
pub use settings::*;
pub use random::*;
