mod memory;
mod query;
mod repository;
mod root;
mod store;

pub mod password;
pub mod policy;

pub use memory::*;
pub use query::*;
pub use repository::*;
pub use root::*;
pub use store::*;
