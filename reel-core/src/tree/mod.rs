mod arena;
mod loader;
mod media_tree;
mod node;

pub use arena::NodeArena;
pub use loader::LoadTask;
pub use media_tree::{Direction, EnterOutcome, MediaTree};
pub use node::{MediaEntry, MediaNode, NodeId, NodeKind};
