//! Graph storage and bounded traversal (C3 `Store`/`Retrieve`/`AddTriple`/
//! `Context`/`Path`).

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::RwLock;

use crate::error::{MrhError, Result};
use crate::graph::{MrhGraph, Predicate, Triple};
use crate::params::MrhParams;

/// Storage backend for MRH graphs. Keys follow §6's layout:
/// `mrh_graph/<content_hash>` for the arena of graphs, `lct_mrh/<lct_id>`
/// for the per-LCT pointer.
pub trait MrhStore {
    fn get_graph(&self, content_hash: &str) -> Result<Option<MrhGraph>>;
    fn put_graph(&self, graph: MrhGraph) -> Result<String>;
    fn get_pointer(&self, lct_id: &str) -> Result<Option<String>>;
    fn set_pointer(&self, lct_id: &str, content_hash: &str) -> Result<()>;
}

/// In-memory MRH store: a flat content-addressed arena plus an LCT→hash
/// pointer map, matching the arena-plus-index design note in §9 ("No
/// owning reference crosses the cycle").
pub struct InMemoryMrhStore {
    graphs: RwLock<HashMap<String, MrhGraph>>,
    pointers: RwLock<HashMap<String, String>>,
}

impl InMemoryMrhStore {
    pub fn new() -> Self {
        Self {
            graphs: RwLock::new(HashMap::new()),
            pointers: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMrhStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MrhStore for InMemoryMrhStore {
    fn get_graph(&self, content_hash: &str) -> Result<Option<MrhGraph>> {
        Ok(self.graphs.read().unwrap().get(content_hash).cloned())
    }

    fn put_graph(&self, graph: MrhGraph) -> Result<String> {
        let hash = graph.content_hash();
        self.graphs.write().unwrap().insert(hash.clone(), graph);
        Ok(hash)
    }

    fn get_pointer(&self, lct_id: &str) -> Result<Option<String>> {
        Ok(self.pointers.read().unwrap().get(lct_id).cloned())
    }

    fn set_pointer(&self, lct_id: &str, content_hash: &str) -> Result<()> {
        self.pointers
            .write()
            .unwrap()
            .insert(lct_id.to_string(), content_hash.to_string());
        Ok(())
    }
}

/// Result of a `Path` query: the hop sequence and its decayed trust.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub path: Vec<String>,
    pub trust: f64,
}

/// The MRH graph store (C3): content addressing plus bounded BFS.
pub struct MrhGraphStore<S: MrhStore> {
    store: S,
    params: MrhParams,
}

impl<S: MrhStore> MrhGraphStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_params(store, MrhParams::default())
    }

    pub fn with_params(store: S, params: MrhParams) -> Self {
        Self { store, params }
    }

    pub fn params(&self) -> &MrhParams {
        &self.params
    }

    /// `Store(graph) -> content_hash`
    pub fn store(&self, graph: MrhGraph) -> Result<String> {
        self.store.put_graph(graph)
    }

    /// `Retrieve(content_hash) -> graph`
    pub fn retrieve(&self, content_hash: &str) -> Result<MrhGraph> {
        self.store
            .get_graph(content_hash)?
            .ok_or_else(|| MrhError::UnknownHash(content_hash.to_string()))
    }

    /// The graph currently pointed to by `lct_mrh[lct_id]`, creating an
    /// empty self-rooted graph on first access.
    pub fn graph_for(&self, lct_id: &str) -> Result<MrhGraph> {
        match self.store.get_pointer(lct_id)? {
            Some(hash) => self.retrieve(&hash),
            None => Ok(MrhGraph::new(lct_id)),
        }
    }

    /// `AddTriple(subject, predicate, object, weight)`: load-or-create the
    /// subject's graph, append, re-store, and update the subject→hash
    /// pointer.
    pub fn add_triple(
        &self,
        subject: &str,
        predicate: impl Into<Predicate>,
        object: &str,
        weight: f64,
    ) -> Result<String> {
        let mut graph = self.graph_for(subject)?;
        graph.add_triple(Triple::new(subject, predicate, object, weight));
        let hash = self.store.put_graph(graph)?;
        self.store.set_pointer(subject, &hash)?;
        Ok(hash)
    }

    /// `Context(center, radius) -> { included_lcts }`: bounded BFS over the
    /// neighbor relation, hard-capped at `max_context_depth`.
    pub fn context(&self, center: &str, radius: u32) -> Result<HashSet<String>> {
        if radius > self.params.max_context_depth {
            return Err(MrhError::DepthExceeded(radius));
        }

        let mut visited = HashSet::new();
        visited.insert(center.to_string());
        let mut frontier = VecDeque::new();
        frontier.push_back((center.to_string(), 0u32));

        while let Some((node, depth)) = frontier.pop_front() {
            if depth >= radius {
                continue;
            }
            let graph = self.graph_for(&node)?;
            for neighbor in graph.neighbors_of(&node) {
                if visited.insert(neighbor.clone()) {
                    frontier.push_back((neighbor, depth + 1));
                }
            }
        }

        Ok(visited)
    }

    /// `Path(from, to, max_depth) -> (path, trust)`: shortest path by hop
    /// count, ties broken by traversal order (deterministic given the
    /// graph's triple order). Trust is `max(floor, decay^hops)`; a
    /// zero-hop (self) path returns 1.0.
    pub fn path(&self, from: &str, to: &str, max_depth: u32) -> Result<PathResult> {
        if max_depth > self.params.max_context_depth {
            return Err(MrhError::DepthExceeded(max_depth));
        }
        if from == to {
            return Ok(PathResult {
                path: vec![from.to_string()],
                trust: 1.0,
            });
        }

        let mut visited = HashSet::new();
        visited.insert(from.to_string());
        let mut frontier = VecDeque::new();
        frontier.push_back(vec![from.to_string()]);

        while let Some(path) = frontier.pop_front() {
            let node = path.last().unwrap().clone();
            let depth = (path.len() - 1) as u32;
            if depth >= max_depth {
                continue;
            }
            let graph = self.graph_for(&node)?;
            for neighbor in graph.neighbors_of(&node) {
                if neighbor == to {
                    let mut full = path.clone();
                    full.push(neighbor);
                    let hops = (full.len() - 1) as u32;
                    return Ok(PathResult {
                        path: full,
                        trust: self.path_trust(hops),
                    });
                }
                if visited.insert(neighbor.clone()) {
                    let mut next = path.clone();
                    next.push(neighbor.clone());
                    frontier.push_back(next);
                }
            }
        }

        Err(MrhError::PathNotFound {
            from: from.to_string(),
            to: to.to_string(),
            max_depth,
        })
    }

    /// Trust implied by a hop count alone, per §4.3's decay law.
    pub fn path_trust(&self, hops: u32) -> f64 {
        if hops == 0 {
            return 1.0;
        }
        self.params
            .path_decay
            .powi(hops as i32)
            .max(self.params.path_trust_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> MrhGraphStore<InMemoryMrhStore> {
        let store = MrhGraphStore::new(InMemoryMrhStore::new());
        store.add_triple("lct:1", Predicate::Witnessed, "lct:2", 1.0).unwrap();
        store.add_triple("lct:2", Predicate::Witnessed, "lct:3", 1.0).unwrap();
        store.add_triple("lct:3", Predicate::Witnessed, "lct:4", 1.0).unwrap();
        store
    }

    #[test]
    fn path_length_three_decays_to_spec_value() {
        let store = chain();
        let result = store.path("lct:1", "lct:4", 6).unwrap();
        assert_eq!(result.path.len() - 1, 3);
        assert!((result.trust - 0.512).abs() < 1e-9);
    }

    #[test]
    fn path_not_found_within_shallow_depth() {
        let store = chain();
        assert!(matches!(
            store.path("lct:1", "lct:4", 2),
            Err(MrhError::PathNotFound { .. })
        ));
    }

    #[test]
    fn self_path_is_full_trust() {
        let store = chain();
        let result = store.path("lct:1", "lct:1", 6).unwrap();
        assert_eq!(result.trust, 1.0);
        assert_eq!(result.path, vec!["lct:1".to_string()]);
    }

    #[test]
    fn context_respects_radius() {
        let store = chain();
        let ctx = store.context("lct:1", 1).unwrap();
        assert!(ctx.contains("lct:1"));
        assert!(ctx.contains("lct:2"));
        assert!(!ctx.contains("lct:3"));
    }

    #[test]
    fn context_over_cap_errors() {
        let store = chain();
        assert!(matches!(
            store.context("lct:1", 11),
            Err(MrhError::DepthExceeded(11))
        ));
    }

    #[test]
    fn monotonic_trust_in_distance() {
        let store = chain();
        let p1 = store.path("lct:1", "lct:2", 6).unwrap();
        let p2 = store.path("lct:1", "lct:4", 6).unwrap();
        assert!(p1.trust >= p2.trust);
    }
}
