use wildgrid::event::LogEvent;
use wildgrid::scenario::{Scenario, ScenarioLoader};
use wildgrid::session::GameSession;
use wildgrid::tile::{Coord, TileEntity};

fn scenario_with_seed(seed: u64) -> Scenario {
    let mut scenario = Scenario::frontier();
    scenario.seed = seed;
    scenario
}

#[test]
fn first_move_updates_position_vitals_and_fog() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    assert_eq!(session.player().position, Coord::new(0, 0));

    let events = session.move_by(1, 0);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, LogEvent::Moved { x: 1, y: 0, .. })),
        "move should report the destination: {events:?}"
    );
    assert_eq!(session.player().position, Coord::new(1, 0));
    assert_eq!(session.player().hunger, 99);
    assert_eq!(session.player().water, 99);

    for coord in [
        Coord::new(0, 0),
        Coord::new(1, 0),
        Coord::new(2, 0),
        Coord::new(1, 1),
        Coord::new(1, -1),
    ] {
        assert!(
            session.ledger().is_explored(coord),
            "{coord:?} should be revealed after moving east"
        );
    }
}

#[test]
fn visited_tile_contents_are_stable_without_search() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    session.move_by(1, 0);

    let first_visit = session.store().get(Coord::new(1, 0)).unwrap().contents.clone();
    assert!(
        (3..=6).contains(&first_visit.len()),
        "first visit should stock the tile"
    );

    session.move_by(-1, 0);
    session.move_by(1, 0);
    let second_visit = &session.store().get(Coord::new(1, 0)).unwrap().contents;
    assert_eq!(
        *second_visit, first_visit,
        "revisiting must not regenerate contents"
    );
}

#[test]
fn search_is_the_only_regeneration_path() {
    let mut session = GameSession::new(&scenario_with_seed(5));
    let spawn = session.player().position;

    let events = session.search();
    assert!(
        events
            .iter()
            .any(|e| matches!(e, LogEvent::Searched { found } if (3..=6).contains(found))),
        "search should report a fresh spawn count: {events:?}"
    );
    let after = session.store().get(spawn).unwrap().contents.len();
    assert!((3..=6).contains(&after));
    // Searching costs effort even when the loot disappoints.
    assert!(session.player().hunger < 100);
}

#[test]
fn gathering_accumulates_counts_by_name() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    let spawn = session.player().position;
    let tile = session.store_mut().get_or_create(spawn);
    tile.contents.clear();
    tile.contents.push(TileEntity::Resource { name: "Wood".to_string(), remaining: 3 });
    tile.contents.push(TileEntity::Resource { name: "Wood".to_string(), remaining: 2 });

    let first = session.gather(0);
    assert!(
        first
            .iter()
            .any(|e| matches!(e, LogEvent::Gathered { count: 3, .. })),
        "first gather should yield 3: {first:?}"
    );
    // The survivor shifted down to index 0.
    let second = session.gather(0);
    assert!(
        second
            .iter()
            .any(|e| matches!(e, LogEvent::Gathered { count: 2, .. })),
        "second gather should yield 2: {second:?}"
    );

    assert_eq!(session.player().item_count("Wood"), 5, "counts must accumulate");
    assert!(session.store().get(spawn).unwrap().contents.is_empty());
}

#[test]
fn gathering_a_stale_index_is_a_noop() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    let spawn = session.player().position;
    let len = session.store().get(spawn).unwrap().contents.len();

    let events = session.gather(len + 10);
    assert!(
        events.iter().any(|e| matches!(e, LogEvent::Notice { .. })),
        "stale gather should produce a notice: {events:?}"
    );
    assert_eq!(
        session.store().get(spawn).unwrap().contents.len(),
        len,
        "stale gather must not mutate the tile"
    );
    assert!(session.player().inventory.is_empty());
}

#[test]
fn starvation_and_dehydration_decay_on_subsequent_moves() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    session.player_mut().hunger = 0;
    session.player_mut().water = 0;
    let hp_before = session.player().hp;

    let events = session.move_by(1, 0);
    assert!(
        events.iter().any(|e| matches!(e, LogEvent::Exposure { .. })),
        "zeroed vitals should decay hp on the move: {events:?}"
    );
    // Default decay: 2 for hunger plus 2 for thirst.
    assert_eq!(session.player().hp, hp_before - 4);
}

#[test]
fn exposure_death_is_terminal() {
    let mut session = GameSession::new(&scenario_with_seed(42));
    session.player_mut().hunger = 0;
    session.player_mut().water = 0;
    session.player_mut().hp = 3;

    let events = session.move_by(0, 1);
    assert!(
        events.iter().any(|e| matches!(e, LogEvent::PlayerDied)),
        "decay past zero hp should end the session: {events:?}"
    );
    assert!(session.is_over());

    let position = session.player().position;
    for events in [session.move_by(1, 0), session.search(), session.gather(0)] {
        assert!(
            events.iter().any(|e| matches!(e, LogEvent::Notice { .. })),
            "ended session must reject all actions"
        );
    }
    assert_eq!(session.player().position, position);
}

#[test]
fn map_zoom_toggles_between_view_radii() {
    let mut session = GameSession::new(&scenario_with_seed(42));

    let base = session.snapshot();
    assert_eq!(base.view_radius, 3);
    assert_eq!(base.map.len(), 7 * 7);

    session.toggle_map_zoom();
    let zoomed = session.snapshot();
    assert_eq!(zoomed.view_radius, 6);
    assert_eq!(zoomed.map.len(), 13 * 13);

    session.toggle_map_zoom();
    assert_eq!(session.snapshot().map.len(), 7 * 7);
}

#[test]
fn snapshot_reflects_fog_and_player_marker() {
    let session = GameSession::new(&scenario_with_seed(42));
    let snapshot = session.snapshot();

    let player_cells: Vec<_> = snapshot.map.iter().filter(|c| c.is_player).collect();
    assert_eq!(player_cells.len(), 1, "exactly one player marker");
    assert!(player_cells[0].explored);

    let fogged = snapshot.map.iter().filter(|c| !c.explored).count();
    assert!(fogged > 0, "a fresh session should still have fog in view");
    for cell in snapshot.map.iter().filter(|c| !c.explored) {
        assert!(cell.glyph.is_none(), "fogged cells must not leak biome info");
    }
}

#[test]
fn sessions_with_equal_seeds_agree() {
    let a = GameSession::new(&scenario_with_seed(77));
    let b = GameSession::new(&scenario_with_seed(77));

    let snap_a = a.snapshot();
    let snap_b = b.snapshot();
    assert_eq!(snap_a.tile.biome, snap_b.tile.biome);
    assert_eq!(snap_a.tile.contents, snap_b.tile.contents);
}

#[test]
fn log_feed_is_newest_first_and_capped() {
    let mut scenario = scenario_with_seed(42);
    scenario.tuning.log_cap = 10;
    let mut session = GameSession::new(&scenario);

    for _ in 0..15 {
        session.move_by(1, 0);
    }
    let snapshot = session.snapshot();
    assert!(snapshot.log.len() <= 10, "log must honor its cap");

    let newest = session.move_by(0, 1);
    let snapshot = session.snapshot();
    assert_eq!(
        snapshot.log.first().cloned(),
        newest.last().map(|e| e.message()),
        "most recent event should lead the feed"
    );
}

#[test]
fn bundled_scenario_file_loads_and_validates() {
    let loader = ScenarioLoader::new(env!("CARGO_MANIFEST_DIR"));
    let scenario = loader.load("scenarios/frontier.yaml").expect("bundled scenario");
    assert_eq!(scenario.name, "frontier");
    assert_eq!(scenario.seed, 42);
    assert_eq!(scenario.tuning.view_radius, 3);
}

#[test]
fn scenario_round_trips_through_yaml() {
    let mut scenario = Scenario::frontier();
    scenario.seed = 1337;
    scenario.tuning.mob_chance = 0.45;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("roundtrip.yaml");
    std::fs::write(&path, serde_yaml::to_string(&scenario).unwrap()).unwrap();

    let loaded = ScenarioLoader::new(dir.path()).load("roundtrip.yaml").unwrap();
    assert_eq!(loaded.seed, 1337);
    assert_eq!(loaded.tuning.mob_chance, 0.45);
    assert_eq!(loaded.player.max_hp, scenario.player.max_hp);
}
