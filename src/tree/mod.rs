//! Standardized-path tree
//!
//! Indexes the declarative node forest by canonical path string. The
//! representation is a flat map from canonical path to a node record
//! holding an ordered children list and an optional rule binding.

pub mod path;

pub use path::{PathError, ROOT, canonicalize};

use crate::config::{Mappings, NodeConfig};
use rustc_hash::FxHashMap;
use std::fmt::Write;

#[derive(Debug, Default)]
struct Node {
    children: Vec<String>,
    rule: Option<String>,
}

/// The tree of standardized paths the engine can resolve
#[derive(Debug)]
pub struct PathTree {
    nodes: FxHashMap<String, Node>,
}

impl PathTree {
    /// Build a tree from the mappings document. Ancestor nodes are
    /// created as needed; only the deepest node of each declared subpath
    /// receives the declaration's binding.
    pub fn from_mappings(mappings: &Mappings) -> Result<Self, PathError> {
        let mut tree = Self {
            nodes: FxHashMap::default(),
        };
        tree.nodes.insert(ROOT.to_string(), Node::default());
        for node in &mappings.nodes {
            tree.build(ROOT, node)?;
        }
        Ok(tree)
    }

    fn build(&mut self, parent: &str, declared: &NodeConfig) -> Result<(), PathError> {
        let subpath = canonicalize(&declared.subpath)?;
        let mut segments = subpath.split(path::SEPARATOR);

        // An absolute subpath resets the effective parent to root.
        let mut full_path = parent.to_string();
        let mut first = segments.next();
        if first == Some(ROOT) {
            full_path = ROOT.to_string();
            first = segments.next();
        }

        for segment in first.into_iter().chain(segments) {
            let child = format!("{full_path}{}{segment}", path::SEPARATOR);
            self.add_child(&full_path, child.clone());
            full_path = child;
        }

        if let Some(rule) = &declared.bind {
            // full_path exists: it is either a freshly added child or root.
            self.nodes.get_mut(&full_path).expect("node was just added").rule =
                Some(rule.clone());
        }

        for child in &declared.children {
            self.build(&full_path, child)?;
        }
        Ok(())
    }

    /// Add an edge, creating either endpoint as needed. Idempotent.
    fn add_child(&mut self, parent: &str, child: String) {
        self.nodes.entry(child.clone()).or_default();
        let parent = self
            .nodes
            .entry(parent.to_string())
            .or_default();
        if !parent.children.contains(&child) {
            parent.children.push(child);
        }
    }

    /// True if the given path canonicalizes to a node in the tree.
    pub fn is_valid(&self, path: &str) -> bool {
        canonicalize(path)
            .map(|p| self.nodes.contains_key(&p))
            .unwrap_or(false)
    }

    /// The children of a node, in insertion order.
    pub fn children(&self, path: &str) -> Result<&[String], PathError> {
        let canonical = canonicalize(path)?;
        let node = self
            .nodes
            .get(&canonical)
            .ok_or(PathError::UnknownNode { path: canonical })?;
        Ok(&node.children)
    }

    /// The rule bound to the exact node at the given path.
    pub fn rule_of(&self, path: &str) -> Result<&str, PathError> {
        let canonical = canonicalize(path)?;
        let node = self
            .nodes
            .get(&canonical)
            .ok_or_else(|| PathError::UnknownNode {
                path: canonical.clone(),
            })?;
        node.rule
            .as_deref()
            .ok_or(PathError::Unbound { path: canonical })
    }

    /// All (path, rule) bindings in the tree, in arbitrary order.
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .filter_map(|(path, node)| Some((path.as_str(), node.rule.as_deref()?)))
    }

    /// Render the subtree rooted at the given path as an indented
    /// listing, children in insertion order.
    pub fn render(&self, root: &str) -> Result<String, PathError> {
        let canonical = canonicalize(root)?;
        if !self.nodes.contains_key(&canonical) {
            return Err(PathError::UnknownNode { path: canonical });
        }
        let mut out = String::new();
        self.render_node(&canonical, &canonical, "", false, &mut out);
        Ok(out)
    }

    fn render_node(&self, root: &str, current: &str, prefix: &str, last: bool, out: &mut String) {
        let name = current
            .rsplit(path::SEPARATOR)
            .next()
            .unwrap_or(current);

        out.push_str(prefix);
        let child_prefix = if last {
            let _ = writeln!(out, "└── {name}");
            format!("{prefix}    ")
        } else if current != root {
            let _ = writeln!(out, "├── {name}");
            format!("{prefix}|   ")
        } else {
            let _ = writeln!(out, "{name}");
            prefix.to_string()
        };

        let children = &self.nodes[current].children;
        for (i, child) in children.iter().enumerate() {
            self.render_node(root, child, &child_prefix, i == children.len() - 1, out);
        }
    }
}
