use super::FieldSources;
use crate::key::Path;
use crate::tree::Tree;

/// Deep-merge `overlay` onto `base`, returning the merged tree.
///
/// - Nodes merge recursively per key.
/// - Keys only in `base` are kept; keys only in `overlay` are added.
/// - Any other pairing takes the overlay value.
#[must_use]
pub fn merge(base: &Tree, overlay: &Tree) -> Tree {
    let mut merged = base.clone();
    merge_into(&mut merged, overlay);
    merged
}

fn merge_into(base: &mut Tree, overlay: &Tree) {
    match (base, overlay) {
        (Tree::Node(base_node), Tree::Node(overlay_node)) => {
            for (key, overlay_val) in overlay_node {
                if let Some(base_val) = base_node.get_mut(key) {
                    merge_into(base_val, overlay_val);
                } else {
                    base_node.insert(key.clone(), overlay_val.clone());
                }
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
        },
    }
}

/// Deep-merge `overlay` onto `base`, recording in `sources` that `source`
/// set each value the overlay contributed.
///
/// Values are recorded at their leaf paths; an empty node counts as a leaf.
/// When the overlay replaces a subtree, entries recorded below it by earlier
/// layers are dropped.
#[must_use]
pub fn merge_tracking<S: Clone>(
    base: &Tree,
    overlay: &Tree,
    source: &S,
    sources: &mut FieldSources<S>,
) -> Tree {
    let mut merged = base.clone();
    let mut prefix = Path::new();
    merge_tracking_into(&mut merged, overlay, &mut prefix, source, sources);
    merged
}

fn merge_tracking_into<S: Clone>(
    base: &mut Tree,
    overlay: &Tree,
    prefix: &mut Path,
    source: &S,
    sources: &mut FieldSources<S>,
) {
    match (base, overlay) {
        (Tree::Node(base_node), Tree::Node(overlay_node)) => {
            for (key, overlay_val) in overlay_node {
                prefix.push(key.clone());
                if let Some(base_val) = base_node.get_mut(key) {
                    merge_tracking_into(base_val, overlay_val, prefix, source, sources);
                } else {
                    base_node.insert(key.clone(), overlay_val.clone());
                    record_all_leaves(overlay_val, prefix, source, sources);
                }
                prefix.pop();
            }
        },
        (base, overlay) => {
            *base = overlay.clone();
            sources.retain(|path, _| !path.starts_with(prefix));
            record_all_leaves(overlay, prefix, source, sources);
        },
    }
}

/// Walk a value tree and record all leaf paths with their source.
fn record_all_leaves<S: Clone>(
    val: &Tree,
    prefix: &mut Path,
    source: &S,
    sources: &mut FieldSources<S>,
) {
    match val {
        Tree::Node(node) if !node.is_empty() => {
            for (key, child) in node {
                prefix.push(key.clone());
                record_all_leaves(child, prefix, source, sources);
                prefix.pop();
            }
        },
        _ => {
            sources.insert(prefix.clone(), source.clone());
        },
    }
}
