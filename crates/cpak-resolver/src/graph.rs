//! Resolved dependency graph rendering for `cpak tree`.

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use cpak_core::dependency::{PackageId, ResolvedDeps};

/// A resolved dependency graph backed by petgraph.
///
/// The resolved set guarantees one version per name, so nodes index by name
/// alone. That also absorbs lockfile-decoded children whose versions were
/// erased to empty strings.
pub struct DependencyGraph {
    graph: DiGraph<PackageId, ()>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl DependencyGraph {
    /// Build the graph for a project over its resolved set. `direct` names
    /// the manifest's own dependencies, which hang off the root.
    pub fn from_resolved(
        root: PackageId,
        resolved: &ResolvedDeps,
        direct: &BTreeMap<String, String>,
    ) -> Self {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();

        let root_idx = graph.add_node(root);

        for id in resolved.keys() {
            let idx = graph.add_node(id.clone());
            index.insert(id.name.clone(), idx);
        }

        for name in direct.keys() {
            if let Some(&idx) = index.get(name) {
                graph.add_edge(root_idx, idx, ());
            }
        }

        for (id, children) in resolved {
            let Some(&from) = index.get(&id.name) else {
                continue;
            };
            let Some(children) = children else { continue };
            for child in children {
                if let Some(&to) = index.get(&child.name) {
                    if !graph.edges(from).any(|e| e.target() == to) {
                        graph.add_edge(from, to, ());
                    }
                }
            }
        }

        Self {
            graph,
            index,
            root: root_idx,
        }
    }

    /// Look up a package node by name.
    pub fn find(&self, name: &str) -> Option<&PackageId> {
        self.index.get(name).map(|&idx| &self.graph[idx])
    }

    /// Direct dependencies of a node, sorted by name.
    fn children_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        children.sort_by(|a, b| self.graph[*a].name.cmp(&self.graph[*b].name));
        children
    }

    /// Number of resolved packages (excluding the root).
    pub fn len(&self) -> usize {
        self.graph.node_count().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the dependency tree. Already-printed subtrees collapse to a
    /// single line to keep cyclic and diamond graphs finite.
    pub fn render(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.graph[self.root]));

        let mut visited = HashSet::new();
        visited.insert(self.root);

        let children = self.children_of(self.root);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.render_subtree(&mut output, child, "", is_last, 1, max_depth, &mut visited);
        }
        output
    }

    fn render_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if let Some(max) = max_depth {
            if depth >= max {
                return;
            }
        }
        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.children_of(idx);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i == count - 1;
            self.render_subtree(
                output,
                child,
                &child_prefix,
                is_last,
                depth + 1,
                max_depth,
                visited,
            );
        }

        visited.remove(&idx);
    }
}
