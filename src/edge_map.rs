// Canonical numbering of the undirected edges of a triangle/quad face list.
//
// Built fresh for each subdivision iteration (and for wireframe extraction)
// from the *current* face lists; never persisted on the mesh, because every
// Catmull-Clark level rewrites the topology it indexes.

use std::collections::HashMap;

/// Canonical key for an undirected edge: always (min, max).
/// This ensures (a,b) and (b,a) map to the same entry.
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Bidirectional index over the distinct undirected edges of a face list.
///
/// Each edge gets a dense id in `[0, len())` in first-seen order; the
/// reverse list keeps the direction in which the edge was first encountered
/// (i.e. the winding of the first face that used it).
pub struct EdgeMap {
    index: HashMap<(usize, usize), usize>,
    edges: Vec<[usize; 2]>,
}

impl EdgeMap {
    /// Register every consecutive (wrapping) vertex pair of every face,
    /// once per undirected edge.
    pub fn build(triangles: &[[usize; 3]], quads: &[[usize; 4]]) -> Self {
        let mut map = Self {
            index: HashMap::with_capacity(triangles.len() * 3 + quads.len() * 4),
            edges: Vec::new(),
        };
        for f in triangles {
            map.add_edge(f[0], f[1]);
            map.add_edge(f[1], f[2]);
            map.add_edge(f[2], f[0]);
        }
        for f in quads {
            map.add_edge(f[0], f[1]);
            map.add_edge(f[1], f[2]);
            map.add_edge(f[2], f[3]);
            map.add_edge(f[3], f[0]);
        }
        map
    }

    fn add_edge(&mut self, i: usize, j: usize) {
        let key = edge_key(i, j);
        if !self.index.contains_key(&key) {
            self.index.insert(key, self.edges.len());
            self.edges.push([i, j]);
        }
    }

    /// The distinct undirected edges, in first-seen order and direction.
    /// `edges()[edge_index(i, j)]` is `[i, j]` or `[j, i]`.
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Number of distinct undirected edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Dense id of the edge (i,j), in either direction.
    ///
    /// Panics if the edge was never inserted: the caller reconstructed a
    /// face list that disagrees with the one this map was built from, which
    /// is a programming error, not a runtime condition.
    pub fn edge_index(&self, i: usize, j: usize) -> usize {
        match self.index.get(&edge_key(i, j)) {
            Some(&id) => id,
            None => panic!("no such edge ({i}, {j})"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
