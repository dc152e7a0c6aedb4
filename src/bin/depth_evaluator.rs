use clap::Parser;
use colorfill_solver::anytime::{AnytimeOptions, AnytimeSolver};
use colorfill_solver::engine::Board;
use colorfill_solver::heuristics::count_unabsorbed_colors;
use colorfill_solver::lookahead::solve_lookahead;
use std::collections::BTreeMap;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compares solvers on seeded random boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: u64,

    /// Seed of the first board; the others use consecutive seeds
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Board size (rows and columns)
    #[clap(short, long, default_value_t = 14)]
    size: usize,

    /// Number of palette colors used
    #[clap(short, long, default_value_t = 6)]
    colors: usize,

    /// Lookahead depths to compare
    #[clap(short, long, value_delimiter = ',', default_value = "1,2,3,4")]
    depths: Vec<usize>,

    /// Time limit in seconds for the anytime search on each board (0 skips it)
    #[clap(short, long, default_value_t = 2.0)]
    time_limit: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.depths.contains(&0) {
        eprintln!("Error: lookahead depths must be at least 1");
        return ExitCode::FAILURE;
    }

    let mut strategies: Vec<String> = args.depths.iter().map(|d| format!("depth-{}", d)).collect();
    if args.time_limit > 0.0 {
        strategies.push("anytime".to_string());
    }
    let mut all_costs: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    println!(
        "Starting evaluation on {} random {}x{} boards with {} colors...",
        args.boards, args.size, args.size, args.colors
    );

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx;
        let board = match Board::random(args.size, args.size, args.colors, seed) {
            Ok(board) => board,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let region = board.connected_region((0, 0));
        println!(
            "\nEvaluating Board {} (Seed: {}, colors: {}, lower bound: {} moves)",
            board_idx,
            seed,
            board.distinct_colors(),
            count_unabsorbed_colors(&board, &region)
        );

        for &depth in &args.depths {
            let started = Instant::now();
            let cost = match solve_lookahead(&board, depth) {
                Ok(solver) => solver.count(),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            let name = format!("depth-{}", depth);
            println!(
                "  Strategy: {:<10}, Cost: {:<4}, Time: {:.2}s",
                name,
                cost,
                started.elapsed().as_secs_f64()
            );
            all_costs.entry(name).or_default().push(cost);
        }

        if args.time_limit > 0.0 {
            let solver = AnytimeSolver::new(AnytimeOptions {
                time_budget: Some(Duration::from_secs_f64(args.time_limit)),
                max_solutions: 1,
                ..AnytimeOptions::default()
            });
            match solver.solve(&board) {
                Ok(report) => match report.best() {
                    Some(best) => {
                        println!(
                            "  Strategy: {:<10}, Cost: {:<4}, Nodes: {}",
                            "anytime",
                            best.cost(),
                            report.expanded
                        );
                        all_costs
                            .entry("anytime".to_string())
                            .or_default()
                            .push(best.cost());
                    }
                    None => println!(
                        "  Strategy: {:<10}, no solution within the time limit",
                        "anytime"
                    ),
                },
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("Strategies evaluated: {}", strategies.join(", "));
    println!("\n--- Average Costs ---");

    let mut sorted_avg_costs: Vec<(&str, f64, usize)> = all_costs
        .iter()
        .filter(|(_, costs)| !costs.is_empty())
        .map(|(name, costs)| {
            let total: usize = costs.iter().sum();
            (name.as_str(), total as f64 / costs.len() as f64, costs.len())
        })
        .collect();

    // Sort by average cost ascending
    sorted_avg_costs.sort_by(|a, b| a.1.total_cmp(&b.1));

    for (name, avg_cost, solved) in sorted_avg_costs {
        println!(
            "Strategy {:<10}: Average Cost = {:.2} ({} boards solved)",
            name, avg_cost, solved
        );
    }
    ExitCode::SUCCESS
}
