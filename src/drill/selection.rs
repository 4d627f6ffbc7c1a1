//! Character selection for the next trial

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::algorithm::interval_or_default;
use super::storage::PerformanceStore;
use crate::lexicon::CharacterRecord;

/// Weight numerator: a glyph's weight is this divided by its interval in days
const WEIGHT_SCALE: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Every record equally likely, drawn with replacement
    #[default]
    Uniform,
    /// Records due daily are drawn more often than weekly ones
    IntervalWeighted,
}

impl SelectionPolicy {
    /// Draw one record. `None` only when `records` is empty.
    pub fn pick<'a, R: Rng + ?Sized>(
        &self,
        records: &'a [CharacterRecord],
        store: &PerformanceStore,
        rng: &mut R,
    ) -> Option<&'a CharacterRecord> {
        match self {
            Self::Uniform => records.choose(rng),
            Self::IntervalWeighted => {
                let weights = records.iter().map(|r| weight_for(r, store));
                match WeightedIndex::new(weights) {
                    Ok(dist) => records.get(dist.sample(rng)),
                    Err(e) => {
                        log::warn!("Falling back to uniform selection: {}", e);
                        records.choose(rng)
                    }
                }
            }
        }
    }
}

fn weight_for(record: &CharacterRecord, store: &PerformanceStore) -> u32 {
    WEIGHT_SCALE / interval_or_default(store.get(&record.character)).days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::storage::DEFAULT_STORE_FILE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn records() -> Vec<CharacterRecord> {
        vec![
            CharacterRecord::new("人", "rén", "person"),
            CharacterRecord::new("大", "dà", "big"),
        ]
    }

    #[test]
    fn test_empty_records() {
        let temp = TempDir::new().unwrap();
        let store = PerformanceStore::open(temp.path().join(DEFAULT_STORE_FILE)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(SelectionPolicy::Uniform.pick(&[], &store, &mut rng).is_none());
        assert!(SelectionPolicy::IntervalWeighted.pick(&[], &store, &mut rng).is_none());
    }

    #[test]
    fn test_uniform_reaches_every_record() {
        let temp = TempDir::new().unwrap();
        let store = PerformanceStore::open(temp.path().join(DEFAULT_STORE_FILE)).unwrap();
        let records = records();
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let picked = SelectionPolicy::Uniform.pick(&records, &store, &mut rng).unwrap();
            seen.insert(picked.character.clone());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_weighted_prefers_daily_glyphs() {
        let temp = TempDir::new().unwrap();
        let mut store = PerformanceStore::open(temp.path().join(DEFAULT_STORE_FILE)).unwrap();
        for _ in 0..4 {
            store.record("大", true).unwrap();
        }
        let records = records();
        let mut rng = StdRng::seed_from_u64(42);

        let mut daily = 0;
        for _ in 0..800 {
            let picked = SelectionPolicy::IntervalWeighted
                .pick(&records, &store, &mut rng)
                .unwrap();
            if picked.character == "人" {
                daily += 1;
            }
        }
        // Expected share is 7/8
        assert!(daily > 600, "daily glyph drawn {} times", daily);
    }
}
