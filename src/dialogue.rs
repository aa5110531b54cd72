//! Branching NPC dialogue.
//!
//! Each character owns one or more [`DialogueGraph`]s. A graph is a set of
//! nodes keyed by id plus an adjacency list; traversal only ever follows a
//! listed edge, so a badly wired option simply does nothing.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{GameError, Result};

// ── Nodes ────────────────────────────────────────────────────────────────────

/// A labelled choice on a node and the node it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueOption {
    pub label: String,
    pub target: String,
}

impl DialogueOption {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self { label: label.into(), target: target.into() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DialogueNode {
    pub phrase: String,
    pub options: Vec<DialogueOption>,
    /// Finishing this node ends the conversation.
    pub end: bool,
    /// Characters of `phrase` revealed so far (typewriter effect).
    revealed: usize,
    selected: usize,
}

impl DialogueNode {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self { phrase: phrase.into(), ..Self::default() }
    }

    pub fn with_options(mut self, options: Vec<DialogueOption>) -> Self {
        self.options = options;
        self
    }

    pub fn ending(mut self) -> Self {
        self.end = true;
        self
    }

    pub fn phrase_len(&self) -> usize {
        self.phrase.chars().count()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    fn reset(&mut self) {
        self.revealed = 0;
        self.selected = 0;
    }
}

// ── Interaction surface ──────────────────────────────────────────────────────

/// What the interaction loop needs from whatever the player is talking to.
pub trait Interaction {
    /// Revealed portion of the current phrase.
    fn dialogue(&self) -> &str;
    fn options(&self) -> &[DialogueOption];
    fn selected_option(&self) -> usize;
    /// Move the option cursor by `delta`, clamped to the option list.
    fn select_option(&mut self, delta: i32);
    /// Reveal one more character; stops at the end of the phrase.
    fn advance_rune(&mut self);
    /// Move to the next node along a listed edge.
    fn advance_phrase(&mut self);
    /// True if the current node ends the conversation.
    fn is_exhausted(&self) -> bool;
}

// ── Graph ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct DialogueGraph {
    nodes: HashMap<String, DialogueNode>,
    edges: HashMap<String, Vec<String>>,
    node_key: String,
    root_key: String,
}

impl DialogueGraph {
    /// Start a graph whose root (and current node) is `root_key`.
    pub fn new(root_key: impl Into<String>, root: DialogueNode, connections: Vec<String>) -> Self {
        let root_key = root_key.into();
        let mut graph = Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            node_key: root_key.clone(),
            root_key: root_key.clone(),
        };
        graph.add_node(root_key, root, connections);
        graph
    }

    pub fn add_node(&mut self, key: impl Into<String>, node: DialogueNode, connections: Vec<String>) {
        let key = key.into();
        self.edges.insert(key.clone(), connections);
        self.nodes.insert(key, node);
    }

    pub fn current_key(&self) -> &str {
        &self.node_key
    }

    pub fn root_key(&self) -> &str {
        &self.root_key
    }

    pub fn node(&self, key: &str) -> Option<&DialogueNode> {
        self.nodes.get(key)
    }

    pub fn current(&self) -> Option<&DialogueNode> {
        self.nodes.get(&self.node_key)
    }

    fn current_mut(&mut self) -> Option<&mut DialogueNode> {
        self.nodes.get_mut(&self.node_key)
    }

    /// Edges leaving the current node.
    pub fn connections(&self) -> &[String] {
        self.edges.get(&self.node_key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Return to the root node with a fresh reveal.
    pub fn reset(&mut self) {
        if let Some(node) = self.current_mut() {
            node.reset();
        }
        self.node_key = self.root_key.clone();
        if let Some(node) = self.current_mut() {
            node.reset();
        }
    }

    /// Every edge must point at a node that exists.
    pub fn validate(&self, name: &str) -> Result<()> {
        for (node, targets) in &self.edges {
            if let Some(target) = targets.iter().find(|t| !self.nodes.contains_key(t.as_str())) {
                return Err(GameError::DialogueEdge {
                    graph: name.to_string(),
                    node: node.clone(),
                    target: target.clone(),
                });
            }
        }
        Ok(())
    }

    fn move_to(&mut self, key: String) {
        if let Some(node) = self.current_mut() {
            node.reset();
        }
        self.node_key = key;
    }
}

impl Interaction for DialogueGraph {
    fn dialogue(&self) -> &str {
        let Some(node) = self.current() else { return "" };
        match node.phrase.char_indices().nth(node.revealed) {
            Some((end, _)) => &node.phrase[..end],
            None => &node.phrase,
        }
    }

    fn options(&self) -> &[DialogueOption] {
        self.current().map(|n| n.options.as_slice()).unwrap_or(&[])
    }

    fn selected_option(&self) -> usize {
        self.current().map_or(0, |n| n.selected)
    }

    fn select_option(&mut self, delta: i32) {
        let Some(node) = self.current_mut() else { return };
        let Some(last) = node.options.len().checked_sub(1) else { return };
        let next = node.selected as i64 + i64::from(delta);
        node.selected = next.clamp(0, last as i64) as usize;
    }

    fn advance_rune(&mut self) {
        if let Some(node) = self.current_mut() {
            node.revealed = (node.revealed + 1).min(node.phrase_len());
        }
    }

    fn advance_phrase(&mut self) {
        let Some(node) = self.current() else { return };
        let connections = self.connections();

        let next = if node.options.is_empty() {
            connections.first().cloned()
        } else {
            // Only follow an option that is actually wired up as an edge.
            node.options
                .get(node.selected)
                .filter(|opt| connections.contains(&opt.target))
                .map(|opt| opt.target.clone())
        };

        if let Some(key) = next {
            self.move_to(key);
        }
    }

    fn is_exhausted(&self) -> bool {
        self.current().is_some_and(|n| n.end)
    }
}

// ── Loading ──────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DialogueJson {
    id: String,
    phrase: String,
    #[serde(default)]
    options: Vec<(String, String)>,
    #[serde(default)]
    connections: Vec<String>,
    #[serde(default)]
    end: bool,
}

/// Every dialogue graph in the game, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct DialogueLibrary {
    graphs: HashMap<String, DialogueGraph>,
}

impl DialogueLibrary {
    /// Parse a dialogue file: a JSON object mapping graph names to ordered
    /// node lists. The first node of each list is the root.
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let origin = origin.as_ref();
        let raw: HashMap<String, Vec<DialogueJson>> =
            serde_json::from_str(json).map_err(|e| GameError::parse(origin, e))?;

        let mut graphs = HashMap::new();
        for (name, nodes) in raw {
            let mut iter = nodes.into_iter();
            let Some(first) = iter.next() else {
                return Err(GameError::EmptyDialogue(name));
            };
            let (root_key, root, root_edges) = Self::convert(first);
            let mut graph = DialogueGraph::new(root_key, root, root_edges);
            for entry in iter {
                let (key, node, edges) = Self::convert(entry);
                graph.add_node(key, node, edges);
            }
            graph.validate(&name)?;
            graphs.insert(name, graph);
        }
        tracing::debug!(count = graphs.len(), ?origin, "loaded dialogue graphs");
        Ok(Self { graphs })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GameError::io(path, e))?;
        Self::from_json(&text, path)
    }

    fn convert(entry: DialogueJson) -> (String, DialogueNode, Vec<String>) {
        let options = entry
            .options
            .into_iter()
            .map(|(label, target)| DialogueOption { label, target })
            .collect();
        let node = DialogueNode { phrase: entry.phrase, options, end: entry.end, ..DialogueNode::default() };
        (entry.id, node, entry.connections)
    }

    pub fn insert(&mut self, name: impl Into<String>, graph: DialogueGraph) {
        self.graphs.insert(name.into(), graph);
    }

    pub fn get(&self, name: &str) -> Option<&DialogueGraph> {
        self.graphs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.graphs.contains_key(name)
    }

    pub fn into_graphs(self) -> HashMap<String, DialogueGraph> {
        self.graphs
    }
}
