//! Deterministic daily selection.
//!
//! The backend persists each day's pick so repeated fetches return the same
//! items, but the pick itself is also a pure function of
//! (user, day, content type, filter): the candidate ids are shuffled with a
//! ChaCha8 generator seeded from a stable hash of the selection key. If the
//! persist write is lost, a retry on the same day still lands on the same
//! subset.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{ContentType, Level};

/// Selection size when no level filter applies.
pub const DEFAULT_SELECTION_SIZE: usize = 10;

/// How many items one day's selection holds for a given level.
pub fn selection_size(level: Option<Level>) -> usize {
    match level {
        Some(Level::Easy) => 5,
        Some(Level::Intermediate) => 15,
        Some(Level::Hard) => 20,
        Some(Level::UltraHard) => 60,
        None => DEFAULT_SELECTION_SIZE,
    }
}

/// Identifies one user's selection for one day of one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionKey {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub content_type: ContentType,
    pub level: Option<Level>,
    pub game_type: Option<String>,
}

impl SelectionKey {
    fn seed(&self) -> u64 {
        let mut key = format!(
            "{}|{}|{}",
            self.user_id,
            self.date,
            self.content_type.as_str()
        );
        if let Some(level) = self.level {
            key.push('|');
            key.push_str(level.as_str());
        }
        if let Some(game_type) = &self.game_type {
            key.push('|');
            key.push_str(game_type);
        }
        xxh3_64(key.as_bytes())
    }
}

/// Pick today's ids for `key` out of the full candidate list.
///
/// Returns at most `size` ids; fewer only when the catalog itself is
/// smaller. An empty catalog yields an empty selection.
pub fn pick_daily(key: &SelectionKey, candidates: &[Uuid], size: usize) -> Vec<Uuid> {
    let mut ids = candidates.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(key.seed());
    ids.shuffle(&mut rng);
    ids.truncate(size);
    ids
}
