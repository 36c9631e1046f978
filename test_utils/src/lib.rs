//! Helpers shared by the integration tests.

use std::fmt::Debug;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs a test-writer subscriber filtered by `RUST_LOG` (default `warn`).
/// Only the first call has an effect.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Checks a per-level view of a skip list, level 0 first: every level must
/// be strictly increasing by key and contained in the level below it.
pub fn assert_levels_well_formed<K, V>(levels: &[Vec<(K, V)>])
where
    K: Ord + Debug,
{
    assert!(!levels.is_empty(), "a skip list always has level 0");
    for (level, entries) in levels.iter().enumerate() {
        for pair in entries.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "level {} out of order: {:?} before {:?}",
                level,
                pair[0].0,
                pair[1].0
            );
        }
        if level > 0 {
            let below = &levels[level - 1];
            for (key, _) in entries {
                assert!(
                    below.binary_search_by(|(k, _)| k.cmp(key)).is_ok(),
                    "key {:?} on level {} missing from level {}",
                    key,
                    level,
                    level - 1
                );
            }
        }
    }
    if levels.len() > 1 {
        assert!(
            !levels[levels.len() - 1].is_empty(),
            "top reported level is empty"
        );
    }
}
