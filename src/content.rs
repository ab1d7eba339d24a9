mod error;
mod records;
mod store;

pub use error::ContentError;
pub use records::*;
pub use store::ContentStore;
