mod error;
mod normalize;
pub mod user;

pub use error::*;
pub use normalize::*;
