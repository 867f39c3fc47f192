//! # Category Tree
//!
//! The hierarchical category model and the id arithmetic used for back navigation.
//!
//! Every category carries a dash-delimited id that spells out its path from the root:
//!
//! ```text
//! ""                  root          depth 0
//! ├── "1234-"         Motors        depth 1
//! │   └── "1234-5678-" Cars         depth 2
//! └── "0001-"         Antiques      depth 1
//! ```
//!
//! A child's id is its parent's id plus one `"<segment>-"`, so the number of dashes is the
//! depth and every prefix ending in a dash names an ancestor. That is what lets the
//! navigator rebuild the parent of the current node without storing back-references.

use std::fmt;

/// Separator terminating every id segment.
pub const SEGMENT_SEPARATOR: char = '-';

/// A node in the category tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// `None` marks a leaf: selecting it shows listings rather than more categories.
    pub sub_categories: Option<Vec<Category>>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sub_categories: None,
        }
    }

    /// Builder-style helper for assembling trees in code.
    pub fn with_children(mut self, children: Vec<Category>) -> Self {
        self.sub_categories = Some(children);
        self
    }

    /// Children in display order; empty for a leaf.
    pub fn children(&self) -> &[Category] {
        self.sub_categories.as_deref().unwrap_or(&[])
    }

    /// True when there is something further to navigate into.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn depth(&self) -> usize {
        depth_of(&self.id)
    }

    pub fn is_root(&self) -> bool {
        self.id.is_empty()
    }
}

/// A lookup that walked off the tree.
///
/// The ids handed to the lookup functions are always taken from the same tree, so either
/// variant means the tree and the navigation state have drifted apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// No child of the node at the previous depth has this id.
    NoSuchChild { prefix: String },
    /// Asked for an ancestor deeper than the id itself.
    TooDeep { id: String, target_depth: usize },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::NoSuchChild { prefix } => {
                write!(f, "no category with id {prefix:?} under its parent")
            }
            PathError::TooDeep { id, target_depth } => write!(
                f,
                "id {id:?} has depth {}, cannot take ancestor at depth {target_depth}",
                depth_of(id)
            ),
        }
    }
}

impl std::error::Error for PathError {}

/// Number of segments in `id`. The root (`""`) has depth 0.
pub fn depth_of(id: &str) -> usize {
    id.matches(SEGMENT_SEPARATOR).count()
}

/// The ancestor id of `id` at `depth`: the prefix through the `depth`-th separator.
///
/// Returns `None` when `id` is shallower than `depth`.
pub fn prefix_at(id: &str, depth: usize) -> Option<&str> {
    if depth == 0 {
        return Some("");
    }
    id.match_indices(SEGMENT_SEPARATOR)
        .nth(depth - 1)
        .map(|(index, _)| &id[..=index])
}

/// Returns the node at `target_depth` on the path from `tree` to `id`.
///
/// For each depth `1..=target_depth` the prefix of `id` through that many separators is
/// the id of the next node down, which must be one of the current node's children.
/// `target_depth == 0` is the root itself.
pub fn ancestor_at<'a>(
    tree: &'a Category,
    id: &str,
    target_depth: usize,
) -> Result<&'a Category, PathError> {
    if target_depth > depth_of(id) {
        return Err(PathError::TooDeep {
            id: id.to_string(),
            target_depth,
        });
    }

    let mut node = tree;
    for depth in 1..=target_depth {
        let prefix = prefix_at(id, depth).ok_or_else(|| PathError::TooDeep {
            id: id.to_string(),
            target_depth,
        })?;
        node = node
            .children()
            .iter()
            .find(|child| child.id == prefix)
            .ok_or_else(|| PathError::NoSuchChild {
                prefix: prefix.to_string(),
            })?;
    }
    Ok(node)
}

/// The node identified by `id` itself.
pub fn find<'a>(tree: &'a Category, id: &str) -> Result<&'a Category, PathError> {
    ancestor_at(tree, id, depth_of(id))
}

/// The parent of the node identified by `id`, or `None` when `id` is the root.
pub fn parent_of<'a>(tree: &'a Category, id: &str) -> Option<Result<&'a Category, PathError>> {
    match depth_of(id) {
        0 => None,
        depth => Some(ancestor_at(tree, id, depth - 1)),
    }
}

/// Every node from the root down to the node identified by `id`, both ends included.
pub fn path_to<'a>(tree: &'a Category, id: &str) -> Result<Vec<&'a Category>, PathError> {
    (0..=depth_of(id))
        .map(|depth| ancestor_at(tree, id, depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_tree;

    #[test]
    fn test_depth_of() {
        assert_eq!(depth_of(""), 0);
        assert_eq!(depth_of("1234-"), 1);
        assert_eq!(depth_of("1234-5678-"), 2);
        assert_eq!(depth_of("0001-0268-3001-"), 3);
    }

    #[test]
    fn test_prefix_at() {
        let id = "0001-0268-3001-";
        assert_eq!(prefix_at(id, 0), Some(""));
        assert_eq!(prefix_at(id, 1), Some("0001-"));
        assert_eq!(prefix_at(id, 2), Some("0001-0268-"));
        assert_eq!(prefix_at(id, 3), Some(id));
        assert_eq!(prefix_at(id, 4), None);
    }

    #[test]
    fn test_ancestor_at_full_depth_is_the_node() {
        let tree = sample_tree();
        // Walk the tree and check every node round-trips through its own id
        fn walk(tree: &Category, node: &Category) {
            let found = ancestor_at(tree, &node.id, depth_of(&node.id)).unwrap();
            assert_eq!(found, node);
            for child in node.children() {
                walk(tree, child);
            }
        }
        walk(&tree, &tree);
    }

    #[test]
    fn test_ancestor_one_up_is_the_parent() {
        let tree = sample_tree();
        fn walk(tree: &Category, parent: &Category) {
            for child in parent.children() {
                let found = ancestor_at(tree, &child.id, depth_of(&child.id) - 1).unwrap();
                assert_eq!(found.id, parent.id);
                walk(tree, child);
            }
        }
        walk(&tree, &tree);
    }

    #[test]
    fn test_depth_one_goes_straight_to_root() {
        let tree = sample_tree();
        let root = ancestor_at(&tree, "0001-", 0).unwrap();
        assert!(root.is_root());
        assert_eq!(root.children().len(), tree.children().len());
    }

    #[test]
    fn test_parent_of() {
        let tree = sample_tree();
        assert!(parent_of(&tree, "").is_none());
        assert_eq!(parent_of(&tree, "0001-").unwrap().unwrap().id, "");
        assert_eq!(parent_of(&tree, "0001-0268-").unwrap().unwrap().id, "0001-");
        assert_eq!(
            parent_of(&tree, "0001-0268-3001-").unwrap().unwrap().name,
            "Cars"
        );
    }

    #[test]
    fn test_find() {
        let tree = sample_tree();
        assert_eq!(find(&tree, "0002-").unwrap().name, "Books");
        assert!(find(&tree, "").unwrap().is_root());
    }

    #[test]
    fn test_path_to() {
        let tree = sample_tree();
        let names: Vec<&str> = path_to(&tree, "0001-0268-3002-")
            .unwrap()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Root", "Motors", "Cars", "Honda"]);
        assert_eq!(path_to(&tree, "").unwrap().len(), 1);
        assert!(path_to(&tree, "0003-").is_err());
    }

    #[test]
    fn test_unknown_segment_is_structural_violation() {
        let tree = sample_tree();
        let err = find(&tree, "0001-9999-").unwrap_err();
        assert_eq!(
            err,
            PathError::NoSuchChild {
                prefix: "0001-9999-".to_string()
            }
        );
        assert!(err.to_string().contains("0001-9999-"));
    }

    #[test]
    fn test_descending_through_a_leaf_fails() {
        let tree = sample_tree();
        // "0002-" is a leaf, so nothing can live beneath it
        let err = find(&tree, "0002-0001-").unwrap_err();
        assert!(matches!(err, PathError::NoSuchChild { .. }));
    }

    #[test]
    fn test_target_deeper_than_id() {
        let tree = sample_tree();
        let err = ancestor_at(&tree, "0001-", 2).unwrap_err();
        assert!(matches!(err, PathError::TooDeep { target_depth: 2, .. }));
    }

    #[test]
    fn test_children_and_has_children() {
        let leaf = Category::new("1-", "Leaf");
        assert!(leaf.children().is_empty());
        assert!(!leaf.has_children());

        // An explicitly empty list is still nothing to navigate into
        let empty = Category::new("2-", "Empty").with_children(vec![]);
        assert!(!empty.has_children());

        let parent = Category::new("3-", "Parent").with_children(vec![Category::new("3-1-", "Kid")]);
        assert!(parent.has_children());
        assert_eq!(parent.depth(), 1);
    }
}
