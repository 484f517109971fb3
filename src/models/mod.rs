pub mod finding;
pub mod summary;

pub use finding::*;
pub use summary::*;
