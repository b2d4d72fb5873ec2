use criterion::{black_box, criterion_group, criterion_main, Criterion};
use riposte_core::{
    CombatLog, CombatMove, CombatResolver, CombatSession, Combatant, CombatantId, Domain,
    Environment, FixedOpponent, MoveLibrary, Outcome, RandomDice, Resource, SceneTag,
};

fn fighter(id: u64, name: &str) -> Combatant {
    Combatant::new(
        CombatantId::new(id),
        name,
        [(Domain::Body, 3), (Domain::Mind, 2), (Domain::Awareness, 2)],
    )
    // Deep pools so the benchmark never runs out of resources
    .with_max(Resource::Health, 1_000_000)
    .with_max(Resource::Stamina, 1_000_000)
}

fn bench_resolve_round(c: &mut Criterion) {
    let library = MoveLibrary::standard();
    let blow = library
        .get("Hammer Blow")
        .cloned()
        .unwrap_or_else(CombatMove::fallback);
    let step = library.get("Shadow Step").cloned().unwrap_or_else(CombatMove::fallback);
    let environment = Environment::from_tags([SceneTag::Darkness, SceneTag::ConfinedSpace]);
    let resolver = CombatResolver::new();
    let mut actor = fighter(0, "Hero");
    let mut target = fighter(1, "Bandit");
    let mut dice = RandomDice::seeded(7);

    c.bench_function("resolve_round", |b| {
        b.iter(|| {
            let mut log = CombatLog::new();
            let result = resolver.resolve(
                &mut actor,
                black_box(&blow),
                &mut target,
                black_box(&step),
                &environment,
                &mut log,
                &mut dice,
            );
            black_box(result.is_ok())
        });
    });
}

fn bench_full_encounter(c: &mut Criterion) {
    let library = MoveLibrary::standard();
    let blow = library.get("Hammer Blow").cloned().unwrap_or_else(CombatMove::fallback);
    let guard = library.get("Analytical Defense").cloned().unwrap_or_else(CombatMove::fallback);

    c.bench_function("full_encounter", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let hero = Combatant::new(CombatantId::new(0), "Hero", [(Domain::Body, 3)]);
            let bandit = Combatant::new(CombatantId::new(1), "Bandit", [(Domain::Mind, 2)]);
            let opponent = FixedOpponent::new(guard.clone());
            let mut session = CombatSession::new(hero, bandit, opponent, RandomDice::seeded(seed));
            while session.outcome() == Outcome::Ongoing && session.play_round(&blow).is_ok() {}
            black_box(session.log().round_count())
        });
    });
}

criterion_group!(benches, bench_resolve_round, bench_full_encounter);
criterion_main!(benches);
