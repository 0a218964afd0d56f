//! End-to-end arena scenarios.

use dicty_core::{AgentId, StepId};
use dicty_engine::{AgentState, Arena, ArenaConfig, Simulation, SimulationConfig};
use dicty_field::FieldError;
use dicty_space::Site;
use dicty_test_utils::{
    active_agent, beacon, dormant_agent, restored_arena, scenario_config, FieldBuilder,
};

// ── Reference scenario ──────────────────────────────────────────

#[test]
fn beacon_raises_centre_after_one_step() {
    let values = FieldBuilder::new(10, 10).values();
    let mut arena = restored_arena(vec![beacon(0, 5, 5, 10.0)], values);
    arena.run_step();
    let field = arena.field();
    assert!(field.value_at(Site::new(5, 5)) > field.value_at(Site::new(0, 0)));
    assert!(field.values().iter().all(|&v| v >= 0.0));
}

#[test]
fn fresh_arena_beacon_signal_spreads() {
    let mut arena = Arena::new(scenario_config()).unwrap();
    for _ in 0..30 {
        arena.tick().unwrap();
    }
    let field = arena.field();
    let centre = field.value_at(Site::new(5, 5));
    assert!(centre > 0.0);
    assert!(field.value_at(Site::new(5, 6)) > 0.0);
    assert!(centre >= field.max_value() * 0.5);
    assert_eq!(field.values().len(), 100);
}

// ── State machine through the arena ─────────────────────────────

#[test]
fn agent_on_hot_site_activates_in_one_sync() {
    let values = FieldBuilder::new(10, 10).set(2, 2, 25.0).values();
    let mut arena = restored_arena(vec![dormant_agent(1, 2, 2)], values);
    arena.synchronize(arena.sync_dt()).unwrap();
    assert_eq!(arena.agent(AgentId(1)).unwrap().state(), AgentState::Active);
}

#[test]
fn full_excitation_cycle() {
    let values = FieldBuilder::new(10, 10).values();
    let mut arena = restored_arena(vec![active_agent(1, 2, 2)], values);
    // tau = 2, refractory = 20
    arena.synchronize(2.1).unwrap();
    assert_eq!(arena.agent(AgentId(1)).unwrap().state(), AgentState::Refractory);
    assert_eq!(arena.field().source_at(Site::new(2, 2)), Some(0.0));
    arena.synchronize(19.9).unwrap();
    assert_eq!(arena.agent(AgentId(1)).unwrap().state(), AgentState::Refractory);
    arena.synchronize(0.2).unwrap();
    assert_eq!(arena.agent(AgentId(1)).unwrap().state(), AgentState::Dormant);
}

#[test]
fn beacon_stays_active_and_put_for_a_long_run() {
    let mut arena = Arena::new(scenario_config()).unwrap();
    for _ in 0..500 {
        arena.tick().unwrap();
        let b = arena.agent(AgentId(0)).unwrap();
        assert_eq!(b.state(), AgentState::Active);
        assert_eq!(b.position(), Site::new(5, 5));
    }
}

// ── Movement ────────────────────────────────────────────────────

#[test]
fn earlier_id_wins_and_later_falls_back() {
    let values = FieldBuilder::new(10, 10)
        .set(5, 5, 100.0)
        .set(4, 5, 60.0)
        .values();
    let agents = vec![active_agent(7, 5, 6), active_agent(3, 5, 4)];
    let mut arena = restored_arena(agents, values);
    let m = arena.synchronize(0.5).unwrap();
    assert_eq!(arena.agent(AgentId(3)).unwrap().position(), Site::new(5, 5));
    assert_eq!(arena.agent(AgentId(7)).unwrap().position(), Site::new(4, 5));
    assert_eq!(m.moves_committed, 2);
    assert_eq!(arena.occupant(Site::new(5, 6)), None);
}

#[test]
fn occupied_target_blocks_move() {
    let values = FieldBuilder::new(10, 10).set(5, 5, 100.0).values();
    let mut arena = restored_arena(
        vec![dormant_agent(1, 5, 5), active_agent(2, 5, 4)],
        values,
    );
    let m = arena.synchronize(0.5).unwrap();
    assert_eq!(arena.agent(AgentId(2)).unwrap().position(), Site::new(5, 4));
    assert_eq!(m.moves_blocked, 1);
}

#[test]
fn moves_wrap_around_the_torus() {
    let values = FieldBuilder::new(10, 10).set(9, 0, 50.0).values();
    let mut arena = restored_arena(vec![active_agent(1, 0, 0)], values);
    arena.synchronize(0.5).unwrap();
    assert_eq!(arena.agent(AgentId(1)).unwrap().position(), Site::new(9, 0));
    assert_eq!(arena.occupant(Site::new(9, 0)), Some(AgentId(1)));
}

// ── Determinism ─────────────────────────────────────────────────

fn run_to(config: ArenaConfig, steps: u64) -> Arena {
    let mut sim = Simulation::new(
        Arena::new(config).unwrap(),
        SimulationConfig {
            max_steps: steps,
            sampling: 50,
        },
    )
    .unwrap();
    sim.run(|_, _| Ok::<(), FieldError>(())).unwrap();
    sim.into_arena()
}

#[test]
fn same_seed_same_run() {
    let a = run_to(scenario_config(), 200);
    let b = run_to(scenario_config(), 200);
    assert_eq!(a.step(), StepId(200));
    assert_eq!(a.agents(), b.agents());
    assert_eq!(a.field().values(), b.field().values());
}

#[test]
fn different_seed_different_placement() {
    let a = Arena::new(scenario_config()).unwrap();
    let b = Arena::new(ArenaConfig {
        seed: 43,
        ..scenario_config()
    })
    .unwrap();
    assert_ne!(a.agents(), b.agents());
}
