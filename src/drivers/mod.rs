//! Source driver implementations.
//!
//! Each module provides a struct implementing [`crate::driver::SourceDriver`]
//! that builds a specific site's search-listing URL and extracts normalized
//! records from its HTML.

pub mod pornhub;
pub mod redtube;
pub mod spankbang;
pub mod xnxx;
pub mod xvideos;

pub use pornhub::PornhubDriver;
pub use redtube::RedtubeDriver;
pub use spankbang::SpankbangDriver;
pub use xnxx::XnxxDriver;
pub use xvideos::XvideosDriver;
