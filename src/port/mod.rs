pub mod directory;
pub mod repository;

pub use directory::*;
pub use repository::*;
