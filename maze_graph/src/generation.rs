// generation.rs - Seeded randomized depth-first maze carving

use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::graph::Graph;

/// Tuning for [`Graph::set_random_tree_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Keep only the first `n` shuffled candidates of each popped cell.
    /// `None` explores every candidate, which spans the whole lattice.
    pub max_branch: Option<usize>,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Cells reached from the start corner, start included
    pub visited: usize,
    pub edges: usize,
}

impl Graph {
    /// Carve a spanning tree from the top corner using `seed`.
    pub fn set_random_tree(&mut self, seed: u64) -> GenerationStats {
        self.set_random_tree_with(seed, GenerationOptions::default())
    }

    /// Carve a tree with explicit options.
    ///
    /// Existing adjacency is cleared first. The same seed, size and options
    /// always produce the same adjacency bytes.
    pub fn set_random_tree_with(&mut self, seed: u64, options: GenerationOptions) -> GenerationStats {
        self.clear();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let size = self.size();
        let flat = |c: Cell| (c.i * size + c.j) * size + c.k;

        let mut visited = vec![false; size * size * size];
        let start = self.top_corner();
        visited[flat(start)] = true;
        let mut visited_count = 1;

        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            let mut candidates = self.close_nodes(current);
            candidates.shuffle(&mut rng);
            if let Some(limit) = options.max_branch {
                candidates.truncate(limit);
            }
            debug!("carving from {current}: candidates {candidates:?}");

            for next in candidates {
                if visited[flat(next)] {
                    continue;
                }
                // Candidates come from close_nodes, so they are always adjacent
                self.add_edge(current, next);
                visited[flat(next)] = true;
                visited_count += 1;
                stack.push(next);
            }
        }

        let stats = GenerationStats {
            visited: visited_count,
            edges: self.edge_count(),
        };
        debug!("generation seed {seed}: {stats:?}");
        stats
    }
}
