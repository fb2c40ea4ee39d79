use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::{Parser, ValueEnum};
use splendid_cards::arena::{
    Agent, AgentGenerator, GameSimulationBuilder, GameState,
    agent::{
        GreedyAgentGenerator, PassingAgentGenerator, RandomAgentGenerator, StingyAgentGenerator,
        ValueAgentGenerator,
    },
    competition::{GameResult, SeedCompetitionBuilder},
};
use splendid_cards::core::Catalog;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    Greedy,
    Stingy,
    Value,
    Random,
    Passing,
}

impl Strategy {
    fn generator(self) -> Box<dyn AgentGenerator> {
        match self {
            Strategy::Greedy => Box::<GreedyAgentGenerator>::default(),
            Strategy::Stingy => Box::<StingyAgentGenerator>::default(),
            Strategy::Value => Box::<ValueAgentGenerator>::default(),
            Strategy::Random => Box::<RandomAgentGenerator>::default(),
            Strategy::Passing => Box::<PassingAgentGenerator>::default(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
#[command(name = "splendid")]
#[command(about = "Play seeded games of the gem card game between automatic players")]
struct Cli {
    /// Number of seats. 1 plays a solo time trial.
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=4))]
    players: u8,

    /// Strategy per seat, comma separated. The last one fills any
    /// remaining seats.
    #[arg(short, long, value_enum, value_delimiter = ',', default_value = "greedy")]
    agents: Vec<Strategy>,

    /// Seed for the deal. In benchmark mode the first seed of the range.
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Round cap. 0 means unlimited.
    #[arg(short, long, default_value_t = 100)]
    rounds: u32,

    /// Victory points that start the final round.
    #[arg(long, default_value_t = 15)]
    victory_points: u32,

    /// Log applied actions. RUST_LOG takes precedence.
    #[arg(short, long)]
    verbose: bool,

    /// Play this many consecutive seeds and print aggregate statistics.
    #[arg(short, long)]
    benchmark: Option<u64>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Directory holding cards.csv and tiles.csv.
    #[arg(long, conflicts_with = "synthetic")]
    data: Option<PathBuf>,

    /// Use the generated synthetic catalog.
    #[arg(long)]
    synthetic: bool,
}

impl Cli {
    fn seat_strategies(&self) -> Vec<Strategy> {
        let last = self.agents.last().copied().unwrap_or(Strategy::Greedy);
        (0..usize::from(self.players))
            .map(|idx| self.agents.get(idx).copied().unwrap_or(last))
            .collect()
    }

    fn max_rounds(&self) -> Option<u32> {
        Some(self.rounds).filter(|r| *r > 0)
    }

    fn catalog(&self) -> Result<Catalog, Box<dyn std::error::Error>> {
        if self.synthetic {
            return Ok(Catalog::synthetic());
        }
        let catalog = match &self.data {
            Some(dir) => Catalog::load_from_dir(dir)?,
            None => Catalog::load()?,
        };
        Ok(catalog)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_result(result: &GameResult) {
    println!(
        "seed {} ended after {} rounds ({:?})",
        result.seed, result.rounds, result.end_reason
    );
    for (idx, score) in result.scores.iter().enumerate() {
        let marker = if result.winners.contains(&idx) {
            " *"
        } else {
            ""
        };
        println!("  seat {idx}: {score}{marker}");
    }
}

fn play_single(cli: &Cli, catalog: Arc<Catalog>) -> Result<(), Box<dyn std::error::Error>> {
    let game_state = if cli.players == 1 {
        GameState::new_solo(catalog, cli.seed)
    } else {
        GameState::new(catalog, cli.seed, usize::from(cli.players))
    };
    let agents: Vec<Box<dyn Agent>> = cli
        .seat_strategies()
        .into_iter()
        .enumerate()
        .map(|(idx, strategy)| strategy.generator().generate(idx, &game_state))
        .collect();

    let mut sim = GameSimulationBuilder::default()
        .game_state(game_state)
        .agents(agents)
        .victory_points(cli.victory_points)
        .max_rounds(cli.max_rounds())
        .build()?;
    sim.run();

    let result =
        GameResult::from_game_state(&sim.game_state).ok_or("the game did not finish")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn run_benchmark(
    cli: &Cli,
    catalog: Arc<Catalog>,
    games: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let agent_gens = cli
        .seat_strategies()
        .into_iter()
        .map(Strategy::generator)
        .collect();
    let mut competition = SeedCompetitionBuilder::default()
        .agent_generators(agent_gens)
        .catalog(catalog)
        .victory_points(cli.victory_points)
        .max_rounds(cli.max_rounds())
        .build()?;

    let seeds = cli.seed..cli.seed.saturating_add(games);
    competition.run(seeds)?;
    let summary = competition.summary();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = cli.catalog().and_then(|catalog| {
        let catalog = Arc::new(catalog);
        match cli.benchmark {
            Some(games) => run_benchmark(&cli, catalog, games),
            None => play_single(&cli, catalog),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
