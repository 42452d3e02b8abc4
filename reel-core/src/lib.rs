pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod indexer;
pub mod tree;

pub use cache::{CacheConfig, DirectoryCache};
pub use config::IndexConfig;
pub use error::{ReelError, Result};
pub use filter::{Filter, is_video_name, poster_base_name};
pub use format::{format_count, format_elapsed};
pub use indexer::{IndexStats, Indexer, Listing, LoadMessage, ScanCounters};
pub use tree::{
    Direction, EnterOutcome, LoadTask, MediaEntry, MediaNode, MediaTree, NodeArena, NodeId,
    NodeKind,
};
