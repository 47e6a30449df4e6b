//! Content-addressed triple graph.

use serde::{Deserialize, Serialize};
use web4_core::crypto::sha256_hex;

/// Distinguished predicates the engine reasons about directly; anything
/// else is carried as an opaque `Other` string so hosts can extend the
/// ontology without a core change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
    WitnessedBy,
    Witnessed,
    HasContext,
    Type,
    Other(String),
}

impl Predicate {
    pub fn as_str(&self) -> &str {
        match self {
            Predicate::WitnessedBy => "witnessedBy",
            Predicate::Witnessed => "witnessed",
            Predicate::HasContext => "hasContext",
            Predicate::Type => "type",
            Predicate::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for Predicate {
    fn from(s: &str) -> Self {
        match s {
            "witnessedBy" => Predicate::WitnessedBy,
            "witnessed" => Predicate::Witnessed,
            "hasContext" => Predicate::HasContext,
            "type" => Predicate::Type,
            other => Predicate::Other(other.to_string()),
        }
    }
}

/// A single RDF-style triple: `(subject, predicate, object, weight)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
    pub weight: f64,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<Predicate>,
        object: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            weight,
        }
    }
}

/// An LCT's MRH graph: the flat set of triples touching it, plus the LCT
/// the graph is rooted at. The content hash of a graph is the SHA-256 of
/// its deterministic JSON serialization (triples sorted so that adding the
/// same triple twice is idempotent, per §8's round-trip law).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MrhGraph {
    pub root: String,
    pub triples: Vec<Triple>,
}

impl MrhGraph {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            triples: Vec::new(),
        }
    }

    /// Append a triple, de-duplicating identical `(s,p,o,w)` inputs so that
    /// repeated `AddTriple` calls are idempotent and the resulting hash is
    /// stable.
    pub fn add_triple(&mut self, triple: Triple) {
        if !self.triples.contains(&triple) {
            self.triples.push(triple);
        }
    }

    /// All LCTs appearing as subject or object opposite `center` in any
    /// triple of this graph.
    pub fn neighbors_of(&self, center: &str) -> Vec<String> {
        let mut out = Vec::new();
        for t in &self.triples {
            if t.subject == center && !out.contains(&t.object) {
                out.push(t.object.clone());
            } else if t.object == center && !out.contains(&t.subject) {
                out.push(t.subject.clone());
            }
        }
        out
    }

    /// Deterministic content hash: sort triples into a stable order before
    /// serializing so identical triple sets always hash the same regardless
    /// of insertion order.
    pub fn content_hash(&self) -> String {
        let mut sorted = self.clone();
        sorted.triples.sort_by(|a, b| {
            (
                a.subject.as_str(),
                a.predicate.as_str(),
                a.object.as_str(),
            )
                .cmp(&(b.subject.as_str(), b.predicate.as_str(), b.object.as_str()))
        });
        let bytes = serde_json::to_vec(&sorted).expect("MrhGraph serializes infallibly");
        sha256_hex(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_triple_is_idempotent_on_identical_input() {
        let mut g = MrhGraph::new("lct:a");
        g.add_triple(Triple::new("lct:a", Predicate::WitnessedBy, "lct:b", 1.0));
        let hash1 = g.content_hash();
        g.add_triple(Triple::new("lct:a", Predicate::WitnessedBy, "lct:b", 1.0));
        let hash2 = g.content_hash();
        assert_eq!(hash1, hash2);
        assert_eq!(g.triples.len(), 1);
    }

    #[test]
    fn hash_is_order_independent() {
        let mut g1 = MrhGraph::new("lct:a");
        g1.add_triple(Triple::new("lct:a", Predicate::Type, "human", 1.0));
        g1.add_triple(Triple::new("lct:a", Predicate::HasContext, "ctx", 1.0));

        let mut g2 = MrhGraph::new("lct:a");
        g2.add_triple(Triple::new("lct:a", Predicate::HasContext, "ctx", 1.0));
        g2.add_triple(Triple::new("lct:a", Predicate::Type, "human", 1.0));

        assert_eq!(g1.content_hash(), g2.content_hash());
    }

    #[test]
    fn neighbors_union_subjects_and_objects() {
        let mut g = MrhGraph::new("lct:a");
        g.add_triple(Triple::new("lct:a", Predicate::WitnessedBy, "lct:b", 1.0));
        g.add_triple(Triple::new("lct:c", Predicate::Witnessed, "lct:a", 1.0));

        let mut n = g.neighbors_of("lct:a");
        n.sort();
        assert_eq!(n, vec!["lct:b".to_string(), "lct:c".to_string()]);
    }
}
