use std::{env, fs, path::PathBuf};

use crate::{error::Result, node::Node};

pub fn tmp_file_path(name: &str) -> PathBuf {
    let mut dir = env::temp_dir();
    dir.push("xmldom_tests");
    let _ = fs::create_dir_all(&dir);
    dir.push(name);
    dir
}

/// A chain of `depth` nested `level` elements, the innermost holding `leaf`.
pub fn nested_document(depth: usize) -> Result<Node> {
    let mut innermost = Node::new("leaf")?;
    innermost.set_text("bottom");
    for level in 0..depth {
        let mut parent = Node::new("level")?;
        parent.add_attribute("n", level.to_string())?;
        parent.append_child(innermost)?;
        innermost = parent;
    }
    Ok(innermost)
}
