use std::path::Path;
use std::path::PathBuf;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rustc_hash::FxHashSet;

use maze_search::algorithms::graph_search::GraphSearch;
use maze_search::algorithms::graph_search::Outcome;
use maze_search::frontier::Strategy;
use maze_search::problem::Problem;
use maze_search::problems::maze_2d::Maze2DAction;
use maze_search::problems::maze_2d::Maze2DCell;
use maze_search::problems::maze_2d::Maze2DCost;
use maze_search::problems::maze_2d::Maze2DProblem;
use maze_search::problems::maze_2d::Maze2DState;
use maze_search::registry::StrategyRegistry;
use maze_search::report::Highlight;
use maze_search::report::Recorder;
use maze_search::report::Report;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Solves mazes, drawing what each strategy explored.
#[derive(Parser, Debug)]
#[clap(long_version = maze_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze files. 'A' is the start, 'B' the goal and '#' or '*' are walls.
    #[arg()]
    pub mazes: Vec<PathBuf>,

    #[arg(short, long, env = "MAZE_STRATEGY", default_value = "A* search")]
    pub strategy: String,

    /// Solve with every registered strategy, ignoring --strategy.
    #[arg(short, long)]
    pub all: bool,

    /// List the registered strategies and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Print search stats after each run.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

type M2DOutcome = Outcome<Maze2DState, Maze2DAction, Maze2DCost>;

/// Paints the maze with the cells highlighted by the reports.
fn draw(problem: &Maze2DProblem, reports: &[Report<Maze2DState>]) {
    let mut explored = FxHashSet::default();
    let mut solution = FxHashSet::default();
    for r in reports {
        if r.explored_highlight == Some(Highlight::Explored) {
            explored.extend(r.explored.iter().copied());
        }
        if r.solution_highlight == Some(Highlight::Solution) {
            solution.extend(r.solution_cells.iter().copied());
        }
    }

    let space = problem.space();
    let (rows, cols) = space.dimensions();
    for row in 0..rows {
        let mut line = String::with_capacity(cols * 8);
        for col in 0..cols {
            let Some(s) = Maze2DState::new_from_usize(row, col) else {
                continue;
            };
            let cell = if s == problem.start() {
                "A".red().bold().to_string()
            } else if s == problem.goal() {
                "B".green().bold().to_string()
            } else if solution.contains(&s) {
                "*".yellow().bold().to_string()
            } else if explored.contains(&s) {
                "·".blue().to_string()
            } else if space.at(&s) == Some(Maze2DCell::Wall) {
                "█".dimmed().to_string()
            } else {
                " ".to_string()
            };
            line.push_str(&cell);
        }
        println!("{line}");
    }
}

fn solve(
    problem: &Maze2DProblem,
    name: &str,
    strategy: &dyn Strategy<Maze2DState, Maze2DCost>,
    stats: bool,
) -> bool {
    let mut recorder = Recorder::new();
    let mut search = match GraphSearch::new(problem, strategy) {
        Ok(search) => search,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return false;
        }
    };

    let mut stopwatch = Stopwatch::new_started();
    let outcome: M2DOutcome = match search.run(&mut recorder) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            return false;
        }
    };
    stopwatch.stop();
    let elapsed = stopwatch.elapsed();

    println!("{}", name.bold());
    draw(problem, &recorder.reports);
    match &outcome {
        Outcome::Solved(solution) => println!(
            "Solved in {} actions after {} expansions ({})",
            solution.path.len().green(),
            solution.steps_explored,
            human_duration(&elapsed)
        ),
        Outcome::NoSolution { steps_explored, .. } => println!(
            "{} after {} expansions ({})",
            "No solution".red(),
            steps_explored,
            human_duration(&elapsed)
        ),
    }
    if stats {
        if let Err(e) = search.print_stats() {
            log::warn!("Failed to print stats: {e}");
        }
    }
    println!();
    true
}

fn load(path: &Path) -> Option<Maze2DProblem> {
    match Maze2DProblem::try_from(path) {
        Ok(problem) => {
            log::info!("Loaded {path:?} ({:?})", problem.space().dimensions());
            Some(problem)
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            None
        }
    }
}

fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    args.color.write_global();

    let registry = StrategyRegistry::<Maze2DState, Maze2DCost>::with_defaults();
    if args.list {
        for name in registry.names() {
            println!("{name}");
        }
        return std::process::ExitCode::SUCCESS;
    }

    let strategies: Vec<(&str, &dyn Strategy<Maze2DState, Maze2DCost>)> = if args.all {
        registry.iter().collect()
    } else {
        match registry.get(&args.strategy) {
            Ok(strategy) => vec![(args.strategy.as_str(), strategy)],
            Err(e) => {
                eprintln!("{} {e}", "error:".red().bold());
                return std::process::ExitCode::FAILURE;
            }
        }
    };

    let mut ok = true;
    for path in &args.mazes {
        let Some(problem) = load(path) else {
            ok = false;
            continue;
        };
        println!("{}", path.display().yellow());
        for &(name, strategy) in &strategies {
            ok &= solve(&problem, name, strategy, args.stats);
        }
    }

    if ok {
        std::process::ExitCode::SUCCESS
    } else {
        std::process::ExitCode::FAILURE
    }
}
