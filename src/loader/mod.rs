//! Reweight-then-chunks data loading.
//!
//! One reweight request configures scoring server-side; afterwards every chunk
//! window is fetched concurrently and each arrival is ingested and rendered as
//! soon as it completes, in whatever order the chunks land.

mod request;
mod session;
mod source;

pub use request::{ChunkWindow, ReweightRequest, Weights, chunk_windows, validate_year};
pub use session::{LoadSummary, Loader};
pub use source::{DataSource, HttpDataSource};
