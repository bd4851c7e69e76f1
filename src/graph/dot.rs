//! Graph data structures and DOT serialization
//!
//! A small Graphviz model: one top-level directed graph, nested subgraphs that
//! own nodes, and a flat edge list. Output is a pure function of the content,
//! so the same graph always serializes to the same text.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};

/// Graphviz attributes, serialized in key order
pub type Attrs = BTreeMap<String, String>;

/// Build [`Attrs`] from string pairs
pub fn attrs<const N: usize>(pairs: [(&str, &str); N]) -> Attrs {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Rejected structural change
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("identifier must not be empty")]
    EmptyId,

    #[error("parent {0:?} does not exist")]
    UnknownParent(String),

    #[error("subgraph {0:?} already exists")]
    DuplicateSubgraph(String),
}

/// A node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: String,
    pub attrs: Attrs,
}

/// A directed edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub attrs: Attrs,
}

/// A subgraph and everything declared inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    pub name: String,
    pub attrs: Attrs,
    pub nodes: Vec<Node>,
    pub subgraphs: Vec<Subgraph>,
}

impl Subgraph {
    fn new(name: &str, attrs: Attrs) -> Self {
        Self {
            name: name.to_string(),
            attrs,
            nodes: Vec::new(),
            subgraphs: Vec::new(),
        }
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Subgraph> {
        if self.name == name {
            return Some(self);
        }
        self.subgraphs.iter_mut().find_map(|s| s.find_mut(name))
    }

    fn find(&self, name: &str) -> Option<&Subgraph> {
        if self.name == name {
            return Some(self);
        }
        self.subgraphs.iter().find_map(|s| s.find(name))
    }

    fn walk_nodes<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.nodes.iter());
        for sub in &self.subgraphs {
            sub.walk_nodes(out);
        }
    }
}

/// A directed Graphviz graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    root: Subgraph,
    edges: Vec<Edge>,
    /// Node id to the name of the subgraph that declares it
    node_index: HashMap<String, String>,
}

impl Graph {
    /// Create an empty digraph called `name`
    pub fn new(name: &str) -> Self {
        Self {
            root: Subgraph::new(name, Attrs::new()),
            edges: Vec::new(),
            node_index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Set a graph-level attribute
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.root.attrs.insert(key.to_string(), value.to_string());
    }

    pub fn attrs(&self) -> &Attrs {
        &self.root.attrs
    }

    /// Add a subgraph under `parent` (the graph itself or another subgraph)
    pub fn add_subgraph(&mut self, parent: &str, name: &str, attrs: Attrs) -> Result<(), GraphError> {
        if name.is_empty() {
            return Err(GraphError::EmptyId);
        }
        if self.root.find(name).is_some() {
            return Err(GraphError::DuplicateSubgraph(name.to_string()));
        }
        let parent = self
            .root
            .find_mut(parent)
            .ok_or_else(|| GraphError::UnknownParent(parent.to_string()))?;
        parent.subgraphs.push(Subgraph::new(name, attrs));
        Ok(())
    }

    /// Add a node under `parent`
    ///
    /// Declaring an id twice keeps both declarations; Graphviz merges them
    /// into one node.
    pub fn add_node(&mut self, parent: &str, id: &str, attrs: Attrs) -> Result<(), GraphError> {
        if id.is_empty() {
            return Err(GraphError::EmptyId);
        }
        let subgraph = self
            .root
            .find_mut(parent)
            .ok_or_else(|| GraphError::UnknownParent(parent.to_string()))?;
        subgraph.nodes.push(Node {
            id: id.to_string(),
            attrs,
        });
        self.node_index.insert(id.to_string(), parent.to_string());
        Ok(())
    }

    /// Add an edge between two node ids
    pub fn add_edge(&mut self, from: &str, to: &str, attrs: Attrs) -> Result<(), GraphError> {
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::EmptyId);
        }
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            attrs,
        });
        Ok(())
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Name of the subgraph declaring `id`
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.node_index.get(id).map(String::as_str)
    }

    pub fn subgraph(&self, name: &str) -> Option<&Subgraph> {
        self.root.find(name)
    }

    /// All nodes, in declaration order
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        self.root.walk_nodes(&mut nodes);
        nodes
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Serialize to DOT text
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", quote(&self.root.name))?;
        write_body(f, &self.root, 1)?;
        for edge in &self.edges {
            write!(f, "\t{}->{}", quote(&edge.from), quote(&edge.to))?;
            write_attr_list(f, &edge.attrs)?;
            writeln!(f, ";")?;
        }
        writeln!(f, "}}")
    }
}

fn write_body(f: &mut fmt::Formatter<'_>, graph: &Subgraph, depth: usize) -> fmt::Result {
    let indent = "\t".repeat(depth);
    for (key, value) in &graph.attrs {
        writeln!(f, "{indent}{}={};", key, quote(value))?;
    }
    for sub in &graph.subgraphs {
        writeln!(f, "{indent}subgraph {} {{", quote(&sub.name))?;
        write_body(f, sub, depth + 1)?;
        writeln!(f, "{indent}}}")?;
    }
    for node in &graph.nodes {
        write!(f, "{indent}{}", quote(&node.id))?;
        write_attr_list(f, &node.attrs)?;
        writeln!(f, ";")?;
    }
    Ok(())
}

fn write_attr_list(f: &mut fmt::Formatter<'_>, attrs: &Attrs) -> fmt::Result {
    if attrs.is_empty() {
        return Ok(());
    }
    let mut list = String::new();
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            list.push_str(", ");
        }
        write!(list, "{}={}", key, quote(value))?;
    }
    write!(f, " [ {} ]", list)
}

/// Render an identifier or attribute value as a DOT ID
///
/// Plain identifiers, numerals and HTML-like labels (`<...>`) are emitted
/// verbatim; everything else is double-quoted.
pub fn quote(value: &str) -> String {
    let is_identifier = value
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let is_numeral = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
    let is_html = value.len() >= 2 && value.starts_with('<') && value.ends_with('>');

    if is_identifier || is_numeral || is_html {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
