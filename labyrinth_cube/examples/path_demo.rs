// examples/path_demo.rs - Carve a small maze and print its solution
// Shows the graph layer on its own, then the highlighted ribbon as OpenSCAD.

use anyhow::Result;
use labyrinth_cube::{scad, CubeAssembly};
use maze_graph::Graph;

fn main() -> Result<()> {
    env_logger::init();

    let mut graph = Graph::new(3)?;
    let stats = graph.set_random_tree(42);
    println!("Carved {} cells with {} edges", stats.visited, stats.edges);

    let path = graph.find_path(graph.top_corner(), graph.bottom_corner())?;
    println!("Solution from {} to {}:", graph.top_corner(), graph.bottom_corner());
    for (step, cell) in path.iter().enumerate() {
        println!("  {step:2}: {cell}");
    }

    for k in (0..graph.size()).rev() {
        let layer = graph.layer(k)?;
        println!("\nLevel {k} ({} rooms)", layer.room_count());
        for j in (0..layer.grid_size).rev() {
            let row: String = (0..layer.grid_size)
                .map(|i| if path.contains(&maze_graph::Cell::new(i, j, k)) { '*' } else { '.' })
                .collect();
            println!("  {row}");
        }
    }

    let cube = CubeAssembly::from_graph(&graph, 2.0, 14.0, 35.0)?;
    println!("\n{}", scad::to_scad(&cube.path_solid(&path)?));
    Ok(())
}
