use std::sync::Arc;

use criterion::BenchmarkId;
use criterion::Criterion;

use criterion::criterion_group;
use criterion::criterion_main;
use splendid_cards::arena::Agent;
use splendid_cards::arena::GameSimulationBuilder;
use splendid_cards::arena::GameState;
use splendid_cards::arena::agent::GreedyAgent;
use splendid_cards::arena::agent::RandomAgent;
use splendid_cards::arena::agent::StingyAgent;
use splendid_cards::core::Catalog;

const MAX_ROUNDS: u32 = 100;
const SEED: u64 = 420;

fn run_one_game(catalog: &Arc<Catalog>, agents: Vec<Box<dyn Agent>>) -> GameState {
    let game_state = GameState::new(catalog.clone(), SEED, agents.len());
    let mut sim = GameSimulationBuilder::default()
        .game_state(game_state)
        .agents(agents)
        .max_rounds(Some(MAX_ROUNDS))
        .build()
        .unwrap();
    sim.run();
    sim.game_state
}

fn bench_random_agents(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::load().unwrap());
    let mut group = c.benchmark_group("simulation_random_agents");
    for num_players in 2..=4 {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_players),
            &num_players,
            |b, num_players| {
                b.iter(|| {
                    let agents = (0..*num_players)
                        .map(|idx| -> Box<dyn Agent> { Box::new(RandomAgent::new(idx as u64)) })
                        .collect();
                    run_one_game(&catalog, agents)
                });
            },
        );
    }
    group.finish();
}

fn bench_heuristic_agents(c: &mut Criterion) {
    let catalog = Arc::new(Catalog::load().unwrap());
    let mut group = c.benchmark_group("simulation_heuristic_agents");
    for num_players in 2..=4 {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_players),
            &num_players,
            |b, num_players| {
                b.iter(|| {
                    let agents = (0..*num_players)
                        .map(|idx| -> Box<dyn Agent> {
                            if idx % 2 == 0 {
                                Box::<GreedyAgent>::default()
                            } else {
                                Box::<StingyAgent>::default()
                            }
                        })
                        .collect();
                    run_one_game(&catalog, agents)
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_random_agents, bench_heuristic_agents);
criterion_main!(benches);
