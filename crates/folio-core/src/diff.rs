#![forbid(unsafe_code)]

//! Structural diff between two view trees.
//!
//! [`diff`] walks two [`Node`] trees in lockstep and emits the minimal set of
//! positional patches needed to turn the old tree into the new one. Children
//! are matched by index; there is no keyed reordering.
//!
//! # Invariants
//!
//! 1. `apply(old, diff(old, new)) == new`.
//! 2. `diff(a, a)` is empty.
//! 3. Patches for a parent's child list (`Append`, `Truncate`) come after
//!    all patches addressed inside that parent's surviving children, so a
//!    host can apply them in order without re-resolving paths.

use std::fmt;

use crate::view::{Element, Node};

/// Child-index path from the root. The empty path addresses the root.
pub type NodePath = Vec<usize>;

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Replace the node at `path` with a freshly built subtree.
    Replace {
        /// Target node.
        path: NodePath,
        /// New subtree.
        node: Node,
    },
    /// Change the content of a text node.
    SetText {
        /// Target text node.
        path: NodePath,
        /// New text.
        text: String,
    },
    /// Set or change an attribute.
    SetAttr {
        /// Target element.
        path: NodePath,
        /// Attribute name.
        name: &'static str,
        /// New value.
        value: String,
    },
    /// Remove an attribute.
    RemoveAttr {
        /// Target element.
        path: NodePath,
        /// Attribute name.
        name: &'static str,
    },
    /// Append a child to the element at `path`.
    Append {
        /// Parent element.
        path: NodePath,
        /// New child.
        node: Node,
    },
    /// Drop children of the element at `path` beyond `len`.
    Truncate {
        /// Parent element.
        path: NodePath,
        /// Number of children to keep.
        len: usize,
    },
}

impl Patch {
    /// Path the patch is addressed to.
    pub fn path(&self) -> &[usize] {
        match self {
            Patch::Replace { path, .. }
            | Patch::SetText { path, .. }
            | Patch::SetAttr { path, .. }
            | Patch::RemoveAttr { path, .. }
            | Patch::Append { path, .. }
            | Patch::Truncate { path, .. } => path,
        }
    }
}

/// Compute the patches that turn `old` into `new`.
pub fn diff(old: &Node, new: &Node) -> Vec<Patch> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    diff_node(old, new, &mut path, &mut out);
    out
}

fn diff_node(old: &Node, new: &Node, path: &mut NodePath, out: &mut Vec<Patch>) {
    match (old, new) {
        (Node::Text(a), Node::Text(b)) => {
            if a != b {
                out.push(Patch::SetText {
                    path: path.clone(),
                    text: b.clone(),
                });
            }
        }
        (Node::Element(a), Node::Element(b)) if a.tag == b.tag => {
            diff_attrs(a, b, path, out);
            diff_children(a, b, path, out);
        }
        _ => out.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_attrs(a: &Element, b: &Element, path: &NodePath, out: &mut Vec<Patch>) {
    for (name, value) in &b.attrs {
        if a.get_attr(name) != Some(value.as_str()) {
            out.push(Patch::SetAttr {
                path: path.clone(),
                name: *name,
                value: value.clone(),
            });
        }
    }
    for (name, _) in &a.attrs {
        if b.get_attr(name).is_none() {
            out.push(Patch::RemoveAttr {
                path: path.clone(),
                name: *name,
            });
        }
    }
}

fn diff_children(a: &Element, b: &Element, path: &mut NodePath, out: &mut Vec<Patch>) {
    let common = a.children.len().min(b.children.len());
    for i in 0..common {
        path.push(i);
        diff_node(&a.children[i], &b.children[i], path, out);
        path.pop();
    }
    if b.children.len() > common {
        for child in &b.children[common..] {
            out.push(Patch::Append {
                path: path.clone(),
                node: child.clone(),
            });
        }
    } else if a.children.len() > common {
        out.push(Patch::Truncate {
            path: path.clone(),
            len: common,
        });
    }
}

/// Error returned by [`apply`] when a patch does not fit the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The path does not address an existing node.
    BadPath(NodePath),
    /// The patch kind does not match the addressed node.
    KindMismatch(NodePath),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadPath(p) => write!(f, "no node at path {p:?}"),
            Self::KindMismatch(p) => write!(f, "patch does not fit node at path {p:?}"),
        }
    }
}

impl std::error::Error for PatchError {}

/// Apply patches to an in-memory tree.
///
/// This mirrors what the host does to the DOM and is used to check diffs.
pub fn apply(root: &mut Node, patches: &[Patch]) -> Result<(), PatchError> {
    for patch in patches {
        let target = resolve_mut(root, patch.path())
            .ok_or_else(|| PatchError::BadPath(patch.path().to_vec()))?;
        let mismatch = || PatchError::KindMismatch(patch.path().to_vec());
        match patch {
            Patch::Replace { node, .. } => *target = node.clone(),
            Patch::SetText { text, .. } => match target {
                Node::Text(t) => *t = text.clone(),
                Node::Element(_) => return Err(mismatch()),
            },
            Patch::SetAttr { name, value, .. } => match target {
                Node::Element(el) => el.set_attr(*name, value.clone()),
                Node::Text(_) => return Err(mismatch()),
            },
            Patch::RemoveAttr { name, .. } => match target {
                Node::Element(el) => el.attrs.retain(|(n, _)| n != name),
                Node::Text(_) => return Err(mismatch()),
            },
            Patch::Append { node, .. } => match target {
                Node::Element(el) => el.children.push(node.clone()),
                Node::Text(_) => return Err(mismatch()),
            },
            Patch::Truncate { len, .. } => match target {
                Node::Element(el) => el.children.truncate(*len),
                Node::Text(_) => return Err(mismatch()),
            },
        }
    }
    Ok(())
}

fn resolve_mut<'a>(root: &'a mut Node, path: &[usize]) -> Option<&'a mut Node> {
    let mut node = root;
    for &idx in path {
        node = match node {
            Node::Element(el) => el.children.get_mut(idx)?,
            Node::Text(_) => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(title: &str, items: &[&str], class: Option<&str>) -> Node {
        let mut header = Element::new("header");
        if let Some(c) = class {
            header = header.class(c);
        }
        Element::new("div")
            .child(header.text(title))
            .child(
                Element::new("ul").children(
                    items
                        .iter()
                        .map(|i| Element::new("li").text(*i))
                        .collect::<Vec<_>>(),
                ),
            )
            .into()
    }

    #[test]
    fn identical_trees_produce_nothing() {
        let a = page("Home", &["a", "b"], Some("x"));
        assert!(diff(&a, &a.clone()).is_empty());
    }

    #[test]
    fn text_and_attr_changes() {
        let a = page("Home", &["a"], Some("header--transparent"));
        let b = page("About", &["a"], Some("header--opaque"));
        let patches = diff(&a, &b);
        assert_eq!(
            patches,
            vec![
                Patch::SetAttr {
                    path: vec![0],
                    name: "class",
                    value: "header--opaque".into()
                },
                Patch::SetText {
                    path: vec![0, 0],
                    text: "About".into()
                },
            ]
        );
    }

    #[test]
    fn attribute_removal() {
        let a = page("Home", &[], Some("x"));
        let b = page("Home", &[], None);
        assert_eq!(
            diff(&a, &b),
            vec![Patch::RemoveAttr {
                path: vec![0],
                name: "class"
            }]
        );
    }

    #[test]
    fn child_growth_and_shrink() {
        let a = page("Home", &["a"], None);
        let b = page("Home", &["a", "b", "c"], None);
        let grow = diff(&a, &b);
        assert_eq!(grow.len(), 2);
        assert!(matches!(grow[0], Patch::Append { ref path, .. } if path == &vec![1]));

        let shrink = diff(&b, &a);
        assert_eq!(shrink, vec![Patch::Truncate { path: vec![1], len: 1 }]);
    }

    #[test]
    fn tag_change_replaces_subtree() {
        let a: Node = Element::new("div").child(Element::new("p").text("x")).into();
        let b: Node = Element::new("div").child(Element::new("span").text("x")).into();
        let patches = diff(&a, &b);
        assert_eq!(patches.len(), 1);
        assert!(matches!(&patches[0], Patch::Replace { path, .. } if path == &vec![0]));
    }

    #[test]
    fn apply_reproduces_target() {
        let a = page("Home", &["a", "b", "c"], Some("x"));
        let b = page("Skills", &["a", "z"], None);
        let mut patched = a.clone();
        apply(&mut patched, &diff(&a, &b)).unwrap();
        assert_eq!(patched, b);
    }

    #[test]
    fn apply_rejects_bad_paths() {
        let mut tree: Node = Element::new("div").into();
        let err = apply(
            &mut tree,
            &[Patch::SetText {
                path: vec![3],
                text: "x".into(),
            }],
        )
        .unwrap_err();
        assert_eq!(err, PatchError::BadPath(vec![3]));
    }
}
