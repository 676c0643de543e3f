//! Stress test: fingerprint generation from many threads at once.
//!
//! Random generation must never collide and seeded derivation must agree
//! across threads.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use agentic_crew::{Fingerprint, IdentityConfig};

#[test]
fn stress_concurrent_random_fingerprints_unique() {
    let seen = Arc::new(Mutex::new(HashSet::new()));
    let mut handles = Vec::new();

    for _ in 0..16 {
        let seen = Arc::clone(&seen);
        handles.push(thread::spawn(move || {
            let local: Vec<String> = (0..500)
                .map(|_| IdentityConfig::new().fingerprint().value().to_string())
                .collect();
            let mut seen = seen.lock().unwrap();
            for value in local {
                assert!(seen.insert(value.clone()), "duplicate fingerprint {value}");
            }
        }));
    }

    for handle in handles {
        handle.join().expect("thread panicked");
    }

    assert_eq!(seen.lock().unwrap().len(), 16 * 500);
}

#[test]
fn stress_concurrent_seeded_fingerprints_agree() {
    let expected: Vec<String> = (0..100)
        .map(|i| Fingerprint::from_seed(&format!("agent-{i}")).unwrap().value().to_string())
        .collect();
    let expected = Arc::new(expected);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for (i, value) in expected.iter().enumerate() {
                    let fp = Fingerprint::from_seed(&format!("agent-{i}")).unwrap();
                    assert_eq!(fp.value(), value);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread panicked");
    }
}

#[test]
fn stress_shared_config_read_across_threads() {
    let config = Arc::new(IdentityConfig::from_seed("shared").unwrap());
    let value = config.fingerprint().value().to_string();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || config.to_record())
        })
        .collect();

    for handle in handles {
        let record = handle.join().expect("thread panicked");
        assert_eq!(record["fingerprint"]["value"], value.as_str());
    }
}
