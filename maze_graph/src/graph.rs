// graph.rs - Directed adjacency storage over the cubic lattice

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Direction};
use crate::error::{GraphError, Result};

/// Cubic lattice with one 3-bit adjacency record per cell.
///
/// Each undirected edge is stored exactly once (see [`Direction`]), so
/// traversal has to look at both the cell's own bits and its back references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    size: usize,
    connections: Vec<u8>,
}

/// Unchecked wire form of [`Graph`].
#[derive(Deserialize)]
struct RawGraph {
    size: usize,
    connections: Vec<u8>,
}

/// Number of cells in a `size`³ lattice.
fn cell_count(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(GraphError::EmptyLattice);
    }
    size.checked_mul(size)
        .and_then(|square| square.checked_mul(size))
        .ok_or(GraphError::LatticeTooLarge { size })
}

impl Graph {
    pub fn new(size: usize) -> Result<Self> {
        let cells = cell_count(size)?;
        Ok(Self {
            size,
            connections: vec![0; cells],
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_valid(&self, cell: Cell) -> bool {
        cell.is_valid(self.size)
    }

    #[inline]
    fn index(&self, cell: Cell) -> usize {
        (cell.i * self.size + cell.j) * self.size + cell.k
    }

    pub(crate) fn check(&self, cell: Cell) -> Result<()> {
        if self.is_valid(cell) {
            Ok(())
        } else {
            Err(GraphError::CellOutOfBounds { cell, size: self.size })
        }
    }

    /// Raw adjacency bits of a cell.
    pub fn connections(&self, cell: Cell) -> Option<u8> {
        self.is_valid(cell).then(|| self.connections[self.index(cell)])
    }

    /// The whole adjacency array, in lattice order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.connections
    }

    pub fn is_connected(&self, cell: Cell, dir: Direction) -> bool {
        self.connections(cell).map_or(false, |bits| bits & dir.bit() != 0)
    }

    /// Reset every adjacency record.
    pub fn clear(&mut self) {
        self.connections.fill(0);
    }

    /// Start of the generated maze: `(0, 0, size-1)`.
    pub fn top_corner(&self) -> Cell {
        Cell::new(0, 0, self.size - 1)
    }

    /// Opposite corner on the lowest level: `(size-1, size-1, 0)`.
    pub fn bottom_corner(&self) -> Cell {
        Cell::new(self.size - 1, self.size - 1, 0)
    }

    /// Iterate all lattice cells.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let n = self.size;
        (0..n).flat_map(move |i| (0..n).flat_map(move |j| (0..n).map(move |k| Cell::new(i, j, k))))
    }

    /// Candidate neighbours for generation, unfiltered by connectivity.
    pub fn close_nodes(&self, cell: Cell) -> Vec<Cell> {
        cell.close_nodes(self.size)
    }

    /// Cells reached by following this cell's own stored bits.
    pub fn linked_neighbors(&self, cell: Cell) -> Vec<Cell> {
        let Some(bits) = self.connections(cell) else {
            return Vec::new();
        };

        Direction::ALL
            .iter()
            .filter(|dir| bits & dir.bit() != 0)
            .filter_map(|dir| cell.offset(dir.delta()))
            .collect()
    }

    /// Undirected neighbours: own successors plus every cell whose stored bit
    /// points back at `cell`.
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        let mut result = self.linked_neighbors(cell);
        if !self.is_valid(cell) {
            return result;
        }

        for dir in Direction::ALL {
            let [dx, dy, dz] = dir.delta();
            // The cell that would store an edge pointing at us sits at -delta
            let Some(source) = cell.offset([-dx, -dy, -dz]) else {
                continue;
            };
            if self.is_connected(source, dir) {
                result.push(source);
            }
        }
        result
    }

    /// Undirected degree; a cell is a room iff this is non-zero.
    pub fn degree(&self, cell: Cell) -> usize {
        self.neighbors(cell).len()
    }

    /// Record an edge between two lattice-adjacent cells.
    ///
    /// Returns `false` without touching storage when the cells are not exactly
    /// one step apart or either lies outside the lattice.
    pub fn add_edge(&mut self, a: Cell, b: Cell) -> bool {
        if !self.is_valid(a) || !self.is_valid(b) || a.manhattan(&b) != 1 {
            return false;
        }

        let (holder, dir) = Self::storage_slot(a, b);
        let idx = self.index(holder);
        self.connections[idx] |= dir.bit();
        true
    }

    /// Whether an edge exists between `a` and `b`, in either storage direction.
    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        if !self.is_valid(a) || !self.is_valid(b) || a.manhattan(&b) != 1 {
            return false;
        }
        let (holder, dir) = Self::storage_slot(a, b);
        self.is_connected(holder, dir)
    }

    /// Canonical cell and bit holding the edge between adjacent `a` and `b`.
    /// X/Y go on the lower coordinate, Z goes on the higher one.
    fn storage_slot(a: Cell, b: Cell) -> (Cell, Direction) {
        if a.i != b.i {
            (if a.i < b.i { a } else { b }, Direction::XPositive)
        } else if a.j != b.j {
            (if a.j < b.j { a } else { b }, Direction::YPositive)
        } else {
            (if a.k > b.k { a } else { b }, Direction::ZNegative)
        }
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.connections.iter().map(|bits| bits.count_ones() as usize).sum()
    }

    /// Copy of one z-slice: room flags plus that slice's connection bits.
    pub fn layer(&self, k: usize) -> Result<LayerTopology> {
        self.check(Cell::new(0, 0, k))?;

        let n = self.size;
        let mut is_room = Vec::with_capacity(n * n);
        let mut connections = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let cell = Cell::new(i, j, k);
                is_room.push(self.degree(cell) > 0);
                connections.push(self.connections[self.index(cell)]);
            }
        }

        Ok(LayerTopology {
            grid_size: n,
            is_room,
            connections,
        })
    }
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    /// Accepts only storage a generator could have produced: one record per
    /// cell, known bits only, and every bit pointing at a cell inside the lattice.
    fn try_from(raw: RawGraph) -> Result<Self> {
        let cells = cell_count(raw.size)?;
        if raw.connections.len() != cells {
            return Err(GraphError::InvalidStorage(format!(
                "expected {cells} adjacency records, got {}",
                raw.connections.len()
            )));
        }

        let graph = Graph {
            size: raw.size,
            connections: raw.connections,
        };
        let known = Direction::ALL.iter().fold(0u8, |acc, d| acc | d.bit());
        for cell in graph.cells() {
            let bits = graph.connections[graph.index(cell)];
            if bits & !known != 0 {
                return Err(GraphError::InvalidStorage(format!(
                    "cell {cell} has unknown bits {bits:#05b}"
                )));
            }
            for dir in Direction::ALL {
                let target = cell.offset(dir.delta());
                if bits & dir.bit() != 0 && !target.map_or(false, |t| graph.is_valid(t)) {
                    return Err(GraphError::InvalidStorage(format!(
                        "cell {cell} has a {dir} edge leaving the lattice"
                    )));
                }
            }
        }
        Ok(graph)
    }
}

/// Topology of one level, detached from the graph it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLayer")]
pub struct LayerTopology {
    pub grid_size: usize,
    is_room: Vec<bool>,
    connections: Vec<u8>,
}

/// Unchecked wire form of [`LayerTopology`].
#[derive(Deserialize)]
struct RawLayer {
    grid_size: usize,
    is_room: Vec<bool>,
    connections: Vec<u8>,
}

impl TryFrom<RawLayer> for LayerTopology {
    type Error = GraphError;

    fn try_from(raw: RawLayer) -> Result<Self> {
        let (room_len, conn_len) = (raw.is_room.len(), raw.connections.len());
        LayerTopology::from_parts(raw.grid_size, raw.is_room, raw.connections).ok_or_else(|| {
            GraphError::InvalidStorage(format!(
                "a {0}x{0} layer needs {0}² flags and records, got {room_len} and {conn_len}",
                raw.grid_size
            ))
        })
    }
}

impl LayerTopology {
    /// Build a layer directly from row-major (`i * grid + j`) flags and bits.
    pub fn from_parts(grid_size: usize, is_room: Vec<bool>, connections: Vec<u8>) -> Option<Self> {
        let cells = grid_size.checked_mul(grid_size)?;
        (is_room.len() == cells && connections.len() == cells).then_some(Self {
            grid_size,
            is_room,
            connections,
        })
    }

    /// Every cell a room, no connections.
    pub fn all_rooms(grid_size: usize) -> Self {
        Self {
            grid_size,
            is_room: vec![true; grid_size * grid_size],
            connections: vec![0; grid_size * grid_size],
        }
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> Option<usize> {
        (i < self.grid_size && j < self.grid_size).then(|| i * self.grid_size + j)
    }

    pub fn is_room(&self, i: usize, j: usize) -> bool {
        self.index(i, j).map_or(false, |idx| self.is_room[idx])
    }

    pub fn is_connected(&self, i: usize, j: usize, dir: Direction) -> bool {
        self.index(i, j)
            .map_or(false, |idx| self.connections[idx] & dir.bit() != 0)
    }

    pub fn set_room(&mut self, i: usize, j: usize, room: bool) {
        if let Some(idx) = self.index(i, j) {
            self.is_room[idx] = room;
        }
    }

    pub fn set_connected(&mut self, i: usize, j: usize, dir: Direction, connected: bool) {
        if let Some(idx) = self.index(i, j) {
            if connected {
                self.connections[idx] |= dir.bit();
            } else {
                self.connections[idx] &= !dir.bit();
            }
        }
    }

    pub fn room_count(&self) -> usize {
        self.is_room.iter().filter(|&&r| r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_six_around(center: Cell) -> Vec<Cell> {
        center.close_nodes(4)
    }

    #[test]
    fn test_empty_lattice_rejected() {
        assert_eq!(Graph::new(0), Err(GraphError::EmptyLattice));
    }

    #[test]
    fn test_oversized_lattice_rejected() {
        assert_eq!(
            Graph::new(3_000_000),
            Err(GraphError::LatticeTooLarge { size: 3_000_000 })
        );
        assert_eq!(
            Graph::new(usize::MAX),
            Err(GraphError::LatticeTooLarge { size: usize::MAX })
        );
    }

    #[test]
    fn test_deserialize_checks_storage() {
        let mut graph = Graph::new(2).unwrap();
        graph.set_random_tree(42);
        let json = serde_json::to_string(&graph).unwrap();
        assert_eq!(serde_json::from_str::<Graph>(&json).unwrap(), graph);

        // Too few records
        assert!(serde_json::from_str::<Graph>(r#"{"size":2,"connections":[0,0,0]}"#).is_err());
        // Unknown bit
        assert!(serde_json::from_str::<Graph>(r#"{"size":1,"connections":[8]}"#).is_err());
        // x+ edge out of a 1-cell lattice
        assert!(serde_json::from_str::<Graph>(r#"{"size":1,"connections":[1]}"#).is_err());
        // Size whose cell count overflows
        let huge = format!(r#"{{"size":{},"connections":[]}}"#, usize::MAX);
        assert!(serde_json::from_str::<Graph>(&huge).is_err());
    }

    #[test]
    fn test_deserialize_layer_checks_lengths() {
        let layer = LayerTopology::all_rooms(2);
        let json = serde_json::to_string(&layer).unwrap();
        assert_eq!(serde_json::from_str::<LayerTopology>(&json).unwrap(), layer);

        let short = r#"{"grid_size":2,"is_room":[true],"connections":[0,0,0,0]}"#;
        let err = serde_json::from_str::<LayerTopology>(short).unwrap_err();
        assert!(err.to_string().contains("2x2 layer"));
    }

    #[test]
    fn test_add_edge_every_direction_is_symmetric() {
        let center = Cell::new(1, 1, 1);
        for other in all_six_around(center) {
            let mut graph = Graph::new(4).unwrap();
            assert!(graph.add_edge(other, center));
            assert_eq!(graph.edge_count(), 1);
            assert!(graph.neighbors(center).contains(&other));
            assert!(graph.neighbors(other).contains(&center));
            assert!(graph.has_edge(center, other));
            assert!(graph.has_edge(other, center));
        }
    }

    #[test]
    fn test_add_edge_canonical_storage() {
        let mut graph = Graph::new(4).unwrap();

        // x edge lands on the lower-x cell, whichever order it was given in
        assert!(graph.add_edge(Cell::new(2, 1, 1), Cell::new(1, 1, 1)));
        assert_eq!(graph.connections(Cell::new(1, 1, 1)), Some(Direction::XPositive.bit()));
        assert_eq!(graph.connections(Cell::new(2, 1, 1)), Some(0));

        // y edge lands on the lower-y cell
        graph.clear();
        assert!(graph.add_edge(Cell::new(1, 1, 1), Cell::new(1, 2, 1)));
        assert_eq!(graph.connections(Cell::new(1, 1, 1)), Some(Direction::YPositive.bit()));

        // z edge lands on the upper cell, pointing down
        graph.clear();
        assert!(graph.add_edge(Cell::new(1, 1, 1), Cell::new(1, 1, 2)));
        assert_eq!(graph.connections(Cell::new(1, 1, 2)), Some(Direction::ZNegative.bit()));
        assert_eq!(graph.connections(Cell::new(1, 1, 1)), Some(0));
        assert_eq!(graph.linked_neighbors(Cell::new(1, 1, 2)), vec![Cell::new(1, 1, 1)]);
    }

    #[test]
    fn test_add_edge_rejects_non_adjacent() {
        let mut graph = Graph::new(4).unwrap();
        assert!(!graph.add_edge(Cell::new(0, 0, 0), Cell::new(1, 1, 0)));
        assert!(!graph.add_edge(Cell::new(0, 0, 0), Cell::new(0, 0, 2)));
        assert!(!graph.add_edge(Cell::new(1, 1, 1), Cell::new(1, 1, 1)));
        assert!(!graph.add_edge(Cell::new(3, 0, 0), Cell::new(4, 0, 0)));
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_neighbors_mixed_storage() {
        let mut graph = Graph::new(4).unwrap();
        // Own x+ bit, back reference from above, back reference from y-1
        let c = Cell::new(1, 1, 1);
        assert!(graph.add_edge(c, Cell::new(2, 1, 1)));
        assert!(graph.add_edge(Cell::new(1, 1, 2), c));
        assert!(graph.add_edge(Cell::new(1, 0, 1), c));

        let mut neighbors = graph.neighbors(c);
        neighbors.sort();
        assert_eq!(
            neighbors,
            vec![Cell::new(1, 0, 1), Cell::new(1, 1, 2), Cell::new(2, 1, 1)]
        );
        assert_eq!(graph.linked_neighbors(c), vec![Cell::new(2, 1, 1)]);
    }

    #[test]
    fn test_layer_copies_room_flags() {
        let mut graph = Graph::new(3).unwrap();
        assert!(graph.add_edge(Cell::new(0, 0, 2), Cell::new(0, 0, 1)));
        assert!(graph.add_edge(Cell::new(0, 0, 1), Cell::new(1, 0, 1)));

        let layer = graph.layer(1).unwrap();
        assert!(layer.is_room(0, 0));
        assert!(layer.is_room(1, 0));
        assert!(!layer.is_room(2, 2));
        assert!(layer.is_connected(0, 0, Direction::XPositive));
        assert_eq!(layer.room_count(), 2);

        // Shaft bit lives on the upper level
        let top = graph.layer(2).unwrap();
        assert!(top.is_connected(0, 0, Direction::ZNegative));

        // Later mutation does not leak into the copied slice
        graph.clear();
        assert!(layer.is_room(0, 0));

        assert!(matches!(graph.layer(3), Err(GraphError::CellOutOfBounds { .. })));
    }

    #[test]
    fn test_corners() {
        let graph = Graph::new(5).unwrap();
        assert_eq!(graph.top_corner(), Cell::new(0, 0, 4));
        assert_eq!(graph.bottom_corner(), Cell::new(4, 4, 0));
        assert_eq!(graph.cells().count(), 125);
    }
}
