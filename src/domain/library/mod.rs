pub mod error;
pub mod model;

pub use error::LibraryError;
pub use model::LibraryEntry;
