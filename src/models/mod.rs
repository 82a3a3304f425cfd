//! Data models for Biblion

pub mod author;
pub mod barcode;
pub mod book;
pub mod location;
pub mod publisher;
pub mod user;
pub mod work;

// Re-export commonly used types
pub use author::Author;
pub use barcode::{BarcodeCategory, BarcodeSequence};
pub use book::{Book, BookDetails};
pub use location::{Location, LocationType};
pub use publisher::Publisher;
pub use user::{Role, User, UserClaims};
pub use work::Work;
