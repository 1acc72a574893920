pub mod error;
pub mod omdb;
pub mod traits;

pub use error::DirectoryError;
pub use omdb::OmdbClient;
pub use traits::MovieDirectory;
