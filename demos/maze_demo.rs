use clap::Parser;
use maze_pathfinding::{MazeConfig, Phase, SolveOutcome};

// Generates a maze, prints it, then solves it from entrance to exit and prints the path.
//
// cargo run --example maze_demo -- --width 20 --height 10 --seed 7
//
// Set RUST_LOG=debug to follow the phases.

/// Command line arguments for the maze demo.
#[derive(Parser, Debug)]
#[command(name = "maze_demo")]
#[command(about = "Generate a perfect maze and solve it with A*")]
struct Args {
    /// Number of columns
    #[arg(long, default_value_t = 20)]
    width: usize,

    /// Number of rows
    #[arg(long, default_value_t = 10)]
    height: usize,

    /// Random seed; omit for a different maze every run
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = MazeConfig {
        width: args.width,
        height: args.height,
        seed: args.seed,
    };
    let mut session = match config.session() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut steps = 0;
    while !session.advance().is_complete() {
        steps += 1;
    }
    assert_eq!(session.phase(), Phase::Generated);
    println!("Generated in {} steps:\n{}", steps, session.grid());

    session.begin_solving();
    match session.run_to_end() {
        SolveOutcome::Found { cost, .. } => {
            println!("Path of {} steps:\n{}", cost, session.grid());
        }
        SolveOutcome::NoPath => println!("No path found"),
    }
}
