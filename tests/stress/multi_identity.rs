//! Stress test: many identities persisted side by side.

use std::collections::HashSet;

use agentic_crew::storage::{load_config, save_config};
use agentic_crew::{IdentityConfig, Settings};

#[test]
fn stress_100_unique_identities() {
    let mut values = HashSet::new();
    for _ in 0..100 {
        let config = IdentityConfig::default();
        assert!(values.insert(config.fingerprint().value().to_string()));
    }
    assert_eq!(values.len(), 100);
}

#[test]
fn stress_100_identities_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        home: dir.path().to_path_buf(),
        ..Settings::default()
    };

    let configs: Vec<(String, IdentityConfig)> = (0..100)
        .map(|i| {
            let name = format!("agent-{i}");
            let config = if i % 2 == 0 {
                IdentityConfig::from_seed(&name).unwrap()
            } else {
                IdentityConfig::new()
            };
            (name, config)
        })
        .collect();

    for (name, config) in &configs {
        save_config(config, &settings.identity_path(name)).unwrap();
    }

    let files = std::fs::read_dir(settings.identity_dir()).unwrap().count();
    assert_eq!(files, 100, "no temp files should remain");

    for (name, config) in &configs {
        let loaded = load_config(&settings.identity_path(name)).unwrap();
        assert_eq!(&loaded, config, "identity {name} changed on reload");
    }
}

#[test]
fn stress_seeds_do_not_collide() {
    let values: HashSet<String> = (0..1000)
        .map(|i| {
            IdentityConfig::from_seed(&format!("seed-{i}"))
                .unwrap()
                .fingerprint()
                .value()
                .to_string()
        })
        .collect();
    assert_eq!(values.len(), 1000);
}
