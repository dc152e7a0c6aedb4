use clap::Parser;
use colorfill_solver::anytime::AnytimeSolver;
use colorfill_solver::config::SolverConfig;
use colorfill_solver::engine::Board;
use colorfill_solver::lookahead::LookaheadSolver;
use colorfill_solver::utils::{board_from_text, moves_to_string};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Color-fill solver. Uses the anytime best-first search unless --simple is given.",
    long_about = None
)]
struct Args {
    /// Path to the board file: one line per row, one palette letter (RGBYOPWK) per cell
    board_file: PathBuf,

    /// TOML file with solver limits; command-line flags take precedence
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Use the lookahead solver instead of the anytime search
    #[clap(long)]
    simple: bool,

    /// Lookahead depth: the number of moves simulated ahead of each decision.
    /// The root counts as depth 0, so `--depth 4` looks four moves ahead; solvers that
    /// number the root as depth 1 look one move less for the same value
    #[clap(short, long)]
    depth: Option<usize>,

    /// Time limit in seconds for the anytime search
    #[clap(short, long)]
    time_limit: Option<f64>,

    /// Search without a time limit
    #[clap(long, conflicts_with = "time_limit")]
    no_time_limit: bool,

    /// Maximum number of solutions to collect
    #[clap(short, long)]
    max_solutions: Option<usize>,

    /// Print the board after every lookahead move
    #[clap(long)]
    step: bool,
}

fn read_board_file(path: &Path) -> Result<Board, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    board_from_text(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn load_config(args: &Args) -> Result<SolverConfig, String> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .map_err(|e| format!("Failed to load config {}: {}", path.display(), e))?,
        None => SolverConfig::default(),
    };

    if let Some(depth) = args.depth {
        config.lookahead.max_depth = depth;
    }
    if let Some(secs) = args.time_limit {
        config.anytime.time_limit_secs = Some(secs);
    }
    if args.no_time_limit {
        config.anytime.time_limit_secs = None;
    }
    if let Some(max_solutions) = args.max_solutions {
        config.anytime.max_solutions = max_solutions;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn run_lookahead(board: Board, config: &SolverConfig, step: bool) -> Result<(), String> {
    println!("Using the lookahead solver with depth {}...", config.lookahead.max_depth);

    let mut solver = LookaheadSolver::new(board, config.lookahead.max_depth, config.anchor)
        .map_err(|e| e.to_string())?;
    let mut moves = Vec::new();
    while let Some(color) = solver.next() {
        moves.push(color);
        if step {
            let region = solver.board().connected_region(config.anchor);
            println!("{}", solver.board().to_string_with_highlight(Some(&region)));
            println!("Move {}: {}\n", moves.len(), color);
        }
    }

    println!("Lookahead solver result (cost={}): {}", moves.len(), moves_to_string(&moves));
    Ok(())
}

fn run_anytime(board: &Board, config: &SolverConfig) -> Result<(), String> {
    let options = config.anytime_options();
    match options.time_budget {
        Some(budget) => println!(
            "Using the anytime solver with a time limit of {:.1}s, up to {} solutions...",
            budget.as_secs_f64(),
            options.max_solutions
        ),
        None => println!(
            "Using the anytime solver without a time limit, up to {} solutions...",
            options.max_solutions
        ),
    }

    let report = AnytimeSolver::new(options).solve(board).map_err(|e| e.to_string())?;
    if report.is_empty() {
        println!("No solution found");
    }
    for (i, solution) in report.solutions.iter().enumerate() {
        println!(
            "Solution {} (cost={}): {}",
            i + 1,
            solution.cost(),
            moves_to_string(&solution.moves)
        );
    }
    println!(
        "Stopped: {:?} after expanding {} nodes in {:.2}s",
        report.termination,
        report.expanded,
        report.elapsed.as_secs_f64()
    );
    Ok(())
}

fn run(args: Args) -> Result<(), String> {
    let config = load_config(&args)?;
    let board = read_board_file(&args.board_file)?;
    board.check_anchor(config.anchor).map_err(|e| e.to_string())?;

    println!(
        "Loaded {}x{} board from {}\n",
        board.rows(),
        board.cols(),
        args.board_file.display()
    );
    println!("{}\n", board);

    if args.simple {
        run_lookahead(board, &config, args.step)
    } else {
        if args.step {
            eprintln!("--step only applies to the lookahead solver; ignoring it.");
        }
        run_anytime(&board, &config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("colorfill_solver=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

