// main.rs - labyrinth-cube command line tool
// Generates a maze, builds levels, casing and preview, and writes them as
// OpenSCAD sources (optionally STL, JSON and a PNG map).

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use labyrinth_cube::{
    CasingGeometry, CasingOptions, Csg, CubeAssembly, Exporter, LabyrinthConfig, LevelOptions, MapLayout,
};
use maze_graph::{GenerationOptions, Graph, GraphError};

/// Target edge length of the PNG map in pixels
const MAP_PREVIEW_PIXELS: f64 = 2000.0;

/// CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Named parameter preset (default, config01 .. config06)
    #[arg(short, long, default_value = "default")]
    pub preset: String,

    /// JSON configuration file; replaces the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lattice edge length in cells
    #[arg(long)]
    pub size: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Level wall thickness
    #[arg(long)]
    pub wall: Option<f64>,

    /// Corridor width and height
    #[arg(long)]
    pub path: Option<f64>,

    /// Vertical pitch of the printed stack
    #[arg(long)]
    pub spacing: Option<f64>,

    #[arg(long)]
    pub casing_thickness: Option<f64>,

    /// Fit clearance between cube and casing
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Cut sightline windows into levels and casing
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub windows: Option<bool>,

    /// Weight-reduction cutouts in the casing
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub cutouts: Option<bool>,

    /// Keep at most this many shuffled candidates per carved cell
    #[arg(long)]
    pub max_branch: Option<usize>,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Mesh every part with openscad
    #[arg(long)]
    pub stl: bool,

    /// Write map.scad and map.png
    #[arg(long)]
    pub map: bool,

    /// Also dump CSG trees as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<LabyrinthConfig> {
        let mut config = match &self.config {
            Some(path) => LabyrinthConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LabyrinthConfig::preset(&self.preset)?,
        };

        if let Some(size) = self.size {
            config.cube_size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(wall) = self.wall {
            config.level_wall_thickness = wall;
        }
        if let Some(path) = self.path {
            config.level_path_thickness = path;
        }
        if let Some(spacing) = self.spacing {
            config.level_spacing = spacing;
        }
        if let Some(thickness) = self.casing_thickness {
            config.casing_wall_thickness = thickness;
        }
        if let Some(tolerance) = self.tolerance {
            config.casing_tolerance = tolerance;
        }
        if let Some(windows) = self.windows {
            config.add_windows = windows;
        }
        if let Some(cutouts) = self.cutouts {
            config.casing_cutouts = cutouts;
        }
        if self.max_branch.is_some() {
            config.max_branch = self.max_branch;
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    info!("Starting with {args:?}");

    let config = args.resolve_config()?;
    if args.print_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }
    anyhow::ensure!(
        !args.output.is_file(),
        "Output path {} is a file, expected a directory",
        args.output.display()
    );

    let mut graph = Graph::new(config.cube_size)?;
    let stats = graph.set_random_tree_with(
        config.seed,
        GenerationOptions {
            max_branch: config.max_branch,
        },
    );
    info!(
        "Carved {} cells with {} edges (seed {})",
        stats.visited, stats.edges, config.seed
    );

    let solution = match graph.find_path(graph.top_corner(), graph.bottom_corner()) {
        Ok(path) => {
            info!("Solution path has {} rooms", path.len());
            Some(path)
        }
        Err(GraphError::NoPath { start, goal }) => {
            warn!("No path from {start} to {goal}; preview will have no solution ribbon");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let level_options = LevelOptions {
        windows: config.add_windows,
    };
    let cube = CubeAssembly::from_graph(
        &graph,
        config.level_wall_thickness,
        config.level_path_thickness,
        config.level_spacing,
    )?;
    let casing = CasingGeometry::new(&cube, config.casing_wall_thickness, config.casing_tolerance);
    info!(
        "Level {:.2} wide, casing {:?}",
        cube.base_level().level_size_xy(),
        casing.casing_size()
    );

    let exporter = Exporter::new(&args.output)
        .with_stl(args.stl)
        .with_json(args.json);

    let casing_options = CasingOptions {
        cutouts: config.casing_cutouts,
        windows: config.add_windows,
    };
    let casing_solid = casing.solid(casing_options)?;
    exporter
        .write_part("casing", &casing_solid)
        .context("Failed to export casing")?;

    for (k, level) in cube.levels().iter().enumerate() {
        exporter
            .write_part(&format!("level{k}"), &level.solid(level_options))
            .with_context(|| format!("Failed to export level {k}"))?;
    }

    // Exploded stack with the solution highlighted
    let view = CubeAssembly::new(cube.levels().to_vec(), config.view_spacing)?;
    let mut preview = vec![view.solid(level_options)];
    if let Some(path) = &solution {
        preview.push(view.path_solid(path)?);
    }
    exporter
        .write_scad("cube", &Csg::union(preview))
        .context("Failed to export cube preview")?;
    exporter
        .write_scad("assembly", &casing.cube_in_casing_solid(level_options, casing_options)?)
        .context("Failed to export assembly")?;

    if args.map {
        let map = MapLayout::new(&cube);
        exporter.write_scad("map", &map.solid_layout(level_options))?;
        let scale = MAP_PREVIEW_PIXELS / map.overall_width();
        let img = map.render_preview(scale)?;
        exporter.write_png("map", &img).context("Failed to write map preview")?;
    }

    info!("Done, output in {}", exporter.output_dir().display());
    Ok(())
}
