mod progress;
mod walker;

pub use progress::{IndexStats, LoadMessage, ScanCounters};
pub use walker::{Indexer, Listing, associate_posters, sort_entries};
