// search.rs - Breadth-first shortest path over the undirected view

use log::debug;
use std::collections::VecDeque;

use crate::cell::Cell;
use crate::error::{GraphError, Result};
use crate::graph::Graph;

impl Graph {
    /// Shortest path from `start` to `goal`, both endpoints included.
    ///
    /// Unreachable goals are reported as [`GraphError::NoPath`].
    pub fn find_path(&self, start: Cell, goal: Cell) -> Result<Vec<Cell>> {
        self.check(start)?;
        self.check(goal)?;

        let size = self.size();
        let flat = |c: Cell| (c.i * size + c.j) * size + c.k;

        // None marks "not yet discovered"; start points at itself
        let mut prev: Vec<Option<Cell>> = vec![None; size * size * size];
        prev[flat(start)] = Some(start);

        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if current == goal {
                let path = Self::reconstruct(&prev, start, goal, flat);
                debug!("path {start} -> {goal}: {} cells", path.len());
                return Ok(path);
            }

            for next in self.neighbors(current) {
                let slot = &mut prev[flat(next)];
                if slot.is_none() {
                    *slot = Some(current);
                    queue.push_back(next);
                }
            }
        }

        Err(GraphError::NoPath { start, goal })
    }

    fn reconstruct(
        prev: &[Option<Cell>],
        start: Cell,
        goal: Cell,
        flat: impl Fn(Cell) -> usize,
    ) -> Vec<Cell> {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            match prev[flat(current)] {
                Some(p) => {
                    current = p;
                    path.push(current);
                }
                // Every discovered cell has a predecessor chain back to start
                None => break,
            }
        }
        path.reverse();
        path
    }
}
