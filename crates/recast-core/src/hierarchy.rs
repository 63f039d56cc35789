//! Hierarchy codec: converts a cast forest into the container's flat cast
//! list plus sibling-linked index table, and back.
//!
//! Canonical flattening is pre-order, depth-first, preserving child order;
//! roots are siblings of each other in forest order. Decoding accepts any
//! conforming table, not just the canonical one.

use castfile::cast::HierarchyNode;
use castfile::NO_REFERENCE;

use crate::error::{Error, Result};
use crate::project::Cast;

/// Shape of a decoded hierarchy: `index` points into the flat cast list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub index: usize,
    pub children: Vec<TreeNode>,
}

/// Flatten a cast forest into canonical pre-order and build the parallel
/// hierarchy table in the same pass.
pub fn encode(roots: &[Cast]) -> (Vec<&Cast>, Vec<HierarchyNode>) {
    let mut flat = Vec::new();
    let mut nodes = Vec::new();
    walk_encode(roots, &mut flat, &mut nodes);
    (flat, nodes)
}

fn walk_encode<'a>(siblings: &'a [Cast], flat: &mut Vec<&'a Cast>, nodes: &mut Vec<HierarchyNode>) {
    let mut prev: Option<usize> = None;
    for cast in siblings {
        let index = flat.len();
        if let Some(prev) = prev {
            nodes[prev].next_index = index as i32;
        }
        flat.push(cast);
        nodes.push(HierarchyNode::none());
        if !cast.children.is_empty() {
            nodes[index].child_index = (index + 1) as i32;
            walk_encode(&cast.children, flat, nodes);
        }
        prev = Some(index);
    }
}

/// Reconstruct the forest shape from a hierarchy table.
///
/// Walks the sibling chain from index 0, recursing into child chains. Fails
/// with [`Error::MalformedHierarchy`] on an out-of-range index, on a cycle
/// (a node visited twice), or when the walk leaves nodes unreached — a
/// conforming flattening references every node exactly once.
pub fn decode(nodes: &[HierarchyNode]) -> Result<Vec<TreeNode>> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }
    let mut visited = vec![false; nodes.len()];
    let roots = walk_decode(0, nodes, &mut visited)?;
    if let Some(index) = visited.iter().position(|&v| !v) {
        return Err(Error::MalformedHierarchy {
            reason: "unreached node",
            index: index as i64,
        });
    }
    Ok(roots)
}

fn walk_decode(start: i32, nodes: &[HierarchyNode], visited: &mut [bool]) -> Result<Vec<TreeNode>> {
    let mut out = Vec::new();
    let mut cursor = start;
    while cursor != NO_REFERENCE {
        if cursor < 0 || cursor as usize >= nodes.len() {
            return Err(Error::MalformedHierarchy {
                reason: "index out of range",
                index: cursor as i64,
            });
        }
        let index = cursor as usize;
        if visited[index] {
            return Err(Error::MalformedHierarchy {
                reason: "cycle",
                index: cursor as i64,
            });
        }
        visited[index] = true;

        let node = nodes[index];
        let children = if node.child_index != NO_REFERENCE {
            walk_decode(node.child_index, nodes, visited)?
        } else {
            Vec::new()
        };
        out.push(TreeNode { index, children });
        cursor = node.next_index;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::CastKind;

    fn leaf(name: &str) -> Cast {
        Cast::new(name, CastKind::Group)
    }

    fn with_children(name: &str, children: Vec<Cast>) -> Cast {
        let mut cast = leaf(name);
        cast.children = children;
        cast
    }

    /// Re-encode a decoded shape against the flat name list so round-trips
    /// can be compared structurally.
    fn names(tree: &[TreeNode], flat: &[&Cast]) -> Vec<(String, usize)> {
        fn walk(nodes: &[TreeNode], flat: &[&Cast], depth: usize, out: &mut Vec<(String, usize)>) {
            for node in nodes {
                out.push((flat[node.index].name.clone(), depth));
                walk(&node.children, flat, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        walk(tree, flat, 0, &mut out);
        out
    }

    #[test]
    fn empty_forest_round_trips() {
        let (flat, nodes) = encode(&[]);
        assert!(flat.is_empty());
        assert!(nodes.is_empty());
        assert_eq!(decode(&nodes).unwrap(), Vec::new());
    }

    #[test]
    fn single_node() {
        let forest = vec![leaf("root")];
        let (flat, nodes) = encode(&forest);
        assert_eq!(flat.len(), 1);
        assert_eq!(nodes, vec![HierarchyNode::none()]);
        let tree = decode(&nodes).unwrap();
        assert_eq!(tree, vec![TreeNode { index: 0, children: vec![] }]);
    }

    #[test]
    fn branching_forest_round_trips() {
        let forest = vec![
            with_children(
                "root",
                vec![
                    with_children("a", vec![leaf("a1"), leaf("a2")]),
                    leaf("b"),
                ],
            ),
            with_children("second", vec![leaf("c")]),
        ];
        let (flat, nodes) = encode(&forest);
        assert_eq!(flat.len(), 7);
        // Pre-order: root a a1 a2 b second c
        assert_eq!(nodes[0], HierarchyNode { child_index: 1, next_index: 5 });
        assert_eq!(nodes[1], HierarchyNode { child_index: 2, next_index: 4 });
        assert_eq!(nodes[2], HierarchyNode { child_index: -1, next_index: 3 });

        let tree = decode(&nodes).unwrap();
        assert_eq!(
            names(&tree, &flat),
            vec![
                ("root".into(), 0),
                ("a".into(), 1),
                ("a1".into(), 2),
                ("a2".into(), 2),
                ("b".into(), 1),
                ("second".into(), 0),
                ("c".into(), 1),
            ]
        );
    }

    #[test]
    fn deep_chain_round_trips() {
        let mut cast = leaf("bottom");
        for i in 0..200 {
            cast = with_children(&format!("n{i}"), vec![cast]);
        }
        let forest = vec![cast];
        let (flat, nodes) = encode(&forest);
        assert_eq!(flat.len(), 201);
        let tree = decode(&nodes).unwrap();
        let mut depth = 0;
        let mut cursor = &tree[0];
        while let Some(child) = cursor.children.first() {
            depth += 1;
            cursor = child;
        }
        assert_eq!(depth, 200);
    }

    #[test]
    fn cycle_is_malformed() {
        let nodes = vec![
            HierarchyNode { child_index: -1, next_index: 1 },
            HierarchyNode { child_index: -1, next_index: 0 },
        ];
        let err = decode(&nodes).unwrap_err();
        assert!(matches!(err, Error::MalformedHierarchy { reason: "cycle", .. }));
    }

    #[test]
    fn out_of_range_is_malformed() {
        let nodes = vec![HierarchyNode { child_index: 5, next_index: -1 }];
        let err = decode(&nodes).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedHierarchy { reason: "index out of range", index: 5 }
        ));
    }

    #[test]
    fn unreached_node_is_malformed() {
        // Node 1 is referenced by nobody.
        let nodes = vec![
            HierarchyNode { child_index: -1, next_index: -1 },
            HierarchyNode { child_index: -1, next_index: -1 },
        ];
        let err = decode(&nodes).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedHierarchy { reason: "unreached node", index: 1 }
        ));
    }
}
