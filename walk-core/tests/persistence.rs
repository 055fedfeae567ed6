use rand::{SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};
use walk_core::{WalkingSystem, config::RandomConfig, persist::SystemRecord};

#[test]
fn saved_system_replays_the_same_run() {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_micros();
    let path = std::env::temp_dir().join(format!(
        "walkers_persistence_test_{}_{}.json",
        std::process::id(),
        timestamp
    ));

    let cfg = RandomConfig {
        walkers: 5,
        iterations: 30,
        ..RandomConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(1234);
    let mut original = WalkingSystem::random(&cfg, &mut rng);
    original.save(&path).expect("save");

    let mut loaded = WalkingSystem::load(&path).expect("load");
    assert_eq!(SystemRecord::from(&loaded), SystemRecord::from(&original));
    assert!(loaded.curves().is_err());

    let expected = original.compute_vectrices().clone();
    let replayed = loaded.compute_vectrices();
    assert_eq!(*replayed, expected);
    assert_eq!(replayed.rings.len(), cfg.iterations);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn loading_missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("walkers_persistence_test_does_not_exist.json");
    let err = WalkingSystem::load(&path).unwrap_err();
    assert!(matches!(err, walk_core::WalkError::Io(_)));
}
