use std::io::{self, Write};

use reel_core::{IndexStats, MediaTree, NodeId, format_count};

/// Print every indexed node under the root, with poster associations
pub fn write_listing(tree: &MediaTree, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", tree.root_path().display())?;
    if let Some(root) = tree.node(NodeId::ROOT) {
        for child in &root.children {
            write_node(tree, *child, 1, out)?;
        }
    }
    Ok(())
}

fn write_node(tree: &MediaTree, id: NodeId, indent: usize, out: &mut impl Write) -> io::Result<()> {
    let Some(node) = tree.node(id) else {
        return Ok(());
    };

    let suffix = if node.is_directory() { "/" } else { "" };
    write!(out, "{}{} {}{}", "  ".repeat(indent), node.kind.icon(), node.name, suffix)?;
    if let Some(poster) = node.poster_path().and_then(|p| p.file_name()) {
        write!(out, "  [poster: {}]", poster.to_string_lossy())?;
    }
    writeln!(out)?;

    for child in &node.children {
        write_node(tree, *child, indent + 1, out)?;
    }
    Ok(())
}

pub fn write_summary(stats: &IndexStats, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "\n{} directories, {} files, {} errors",
        format_count(stats.dirs),
        format_count(stats.files),
        format_count(stats.errors)
    )
}
