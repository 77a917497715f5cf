use std::path::PathBuf;

use clap::Parser;
use log::info;
use micromaze::explore::{DepthFirstMapper, FloodFill, Mouse, SimulatedMouse};
use micromaze::grid::{GapBitmask, Maze};
use micromaze::nav::NavigatorConfig;
use micromaze::AStarSearcher;

/// Maps a maze with a simulated mouse, then races from start to goal.
#[derive(Parser)]
struct Options {
    /// Framed gap bitmask of the maze to explore. Defaults to the built-in 6x4 maze.
    maze: Option<PathBuf>,
    /// JSON navigator configuration. Defaults to start (5, 2) facing north, goal (0, 1).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seek the goal by flood fill instead of mapping first.
    #[arg(long)]
    flood: bool,
}

const BUILT_IN: [u8; 24] = [
    0x6, 0xE, 0xC, 0x4, //
    0x5, 0x1, 0x3, 0x9, //
    0x7, 0xA, 0xA, 0x8, //
    0x5, 0x6, 0xA, 0xC, //
    0x3, 0xD, 0x4, 0x1, //
    0x2, 0xB, 0xB, 0x8, //
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opt = Options::parse();

    let bitmask = match &opt.maze {
        Some(path) => GapBitmask::load(&mut std::fs::File::open(path)?)?,
        None => GapBitmask {
            rows: 6,
            columns: 4,
            masks: BUILT_IN.to_vec(),
        },
    };
    let config = match &opt.config {
        Some(path) => serde_json::from_reader(std::fs::File::open(path)?)?,
        None => NavigatorConfig {
            rows: 6,
            columns: 4,
            start: micromaze::Point::new(5, 2),
            goal: micromaze::Point::new(0, 1),
            ..Default::default()
        },
    };

    let mut truth = Maze::create(bitmask.rows, bitmask.columns)?;
    truth.load_gap_bitmask(&bitmask)?;
    println!("{}", truth.render_text());

    let (mut map, mut nav) = config.build()?;
    map.initialise_open();
    let mut mouse = SimulatedMouse::new(truth, config.start)?;

    let t1 = std::time::Instant::now();
    if opt.flood {
        let steps = FloodFill::for_maze(&map).run(&mut map, &mut nav, &mut mouse)?;
        info!("flood fill reached the goal in {steps} moves");
        let mut text = map.render_text();
        nav.insert_navigation_marker(&map, &mut text)?;
        println!("{text}");
        return Ok(());
    }

    let steps = DepthFirstMapper::new().run(&mut map, &mut nav, &mut mouse)?;
    info!("mapped in {steps} moves");

    let mut astar = AStarSearcher::for_maze(&map);
    let path = astar.search_from(&mut map, &nav)?;
    for (i, direction) in path.directions().enumerate() {
        let mut text = map.render_text();
        map.insert_path_markers(&mut text, path.points())?;
        nav.insert_navigation_marker(&map, &mut text)?;
        println!("step {i}:\n{text}");

        mouse.travel(direction)?;
        nav.step(&map, direction)?;
    }

    let t2 = std::time::Instant::now();
    println!(
        "route of {} moves after {} expansions, {:.2?} total",
        path.cost(),
        astar.expansions(),
        t2 - t1
    );
    Ok(())
}
