use std::path::{Path, PathBuf};

use crate::filter::{is_video_name, strip_extension};

/// Unique identifier for a node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

/// Classification of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    Video,
    File,
}

impl NodeKind {
    /// Classify an entry from its name and type
    pub fn classify(name: &str, is_directory: bool) -> Self {
        if is_directory {
            NodeKind::Directory
        } else if is_video_name(name) {
            NodeKind::Video
        } else {
            NodeKind::File
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            NodeKind::Directory => "📁",
            NodeKind::Video => "🎬",
            NodeKind::File => "📄",
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    pub fn is_video(&self) -> bool {
        matches!(self, NodeKind::Video)
    }
}

/// One entry of a directory listing, as produced by a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Sidecar poster image describing this entry
    pub poster: Option<PathBuf>,
}

impl MediaEntry {
    pub fn new(name: String, path: PathBuf, kind: NodeKind) -> Self {
        Self {
            name,
            path,
            kind,
            poster: None,
        }
    }

    /// Name without extension, used for poster lookup
    pub fn base_name(&self) -> &str {
        strip_extension(&self.name)
    }
}

/// A node in the media tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaNode {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Poster image associated with this node
    pub poster: Option<PathBuf>,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Children in listing order (directories first)
    pub children: Vec<NodeId>,
    /// Depth in tree (0 for root)
    pub depth: u16,
    /// Full path to this node
    pub path: PathBuf,
}

impl MediaNode {
    pub fn root(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            id: NodeId::ROOT,
            name,
            kind: NodeKind::Directory,
            poster: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
            path,
        }
    }

    pub fn from_entry(id: NodeId, entry: &MediaEntry, parent: NodeId, depth: u16) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            kind: entry.kind,
            poster: entry.poster.clone(),
            parent: Some(parent),
            children: Vec::new(),
            depth,
            path: entry.path.clone(),
        }
    }

    /// Refresh classification from a newer scan of the same path
    pub(crate) fn update_from(&mut self, entry: &MediaEntry) {
        if !entry.kind.is_directory() {
            self.children.clear();
        }
        self.name.clone_from(&entry.name);
        self.kind = entry.kind;
        self.poster.clone_from(&entry.poster);
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn is_video(&self) -> bool {
        self.kind.is_video()
    }

    pub fn poster_path(&self) -> Option<&Path> {
        self.poster.as_deref()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
