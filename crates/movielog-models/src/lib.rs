pub mod detail;
pub mod summary;
pub mod watched;

pub use detail::MovieDetail;
pub use summary::MovieSummary;
pub use watched::{WatchedMovie, WatchedSummary};
