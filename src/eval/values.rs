use serde::{Deserialize, Serialize};

use crate::eval::pattern::{PatternType, PATTERN_TYPE_COUNT};

/// Sentinel score for a pattern that is already a win. Any accumulated
/// evaluation reaching this magnitude short-circuits the scan.
pub const WIN_VALUE: i64 = 10_000_000;

/// Per-pattern-type scores, tunable at runtime through the facade.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternValues([i64; PATTERN_TYPE_COUNT]);

impl Default for PatternValues {
    fn default() -> PatternValues {
        let mut v = [0i64; PATTERN_TYPE_COUNT];
        v[PatternType::Open5 as usize] = WIN_VALUE;
        v[PatternType::Blocked5 as usize] = WIN_VALUE;
        v[PatternType::BlockedBroken5 as usize] = WIN_VALUE;
        v[PatternType::Over5 as usize] = WIN_VALUE;
        v[PatternType::Open4 as usize] = 5_000;
        v[PatternType::OpenBroken5 as usize] = 2_000;
        v[PatternType::Blocked4 as usize] = 500;
        v[PatternType::OpenBroken4 as usize] = 500;
        v[PatternType::BlockedBroken4 as usize] = 500;
        v[PatternType::Open3 as usize] = 500;
        v[PatternType::OpenBroken3 as usize] = 500;
        v[PatternType::Blocked3 as usize] = 40;
        v[PatternType::BlockedBroken3 as usize] = 40;
        v[PatternType::Open2 as usize] = 20;
        v[PatternType::OpenBroken2 as usize] = 20;
        v[PatternType::Blocked2 as usize] = 5;
        v[PatternType::BlockedBroken2 as usize] = 5;
        // Closed patterns are fully capped by opponent stones and dead:
        // a closed five cannot win under the flanked-five exception.
        PatternValues(v)
    }
}

impl PatternValues {
    pub fn get(&self, ty: PatternType) -> i64 {
        self.0[ty as usize]
    }

    pub fn set(&mut self, ty: PatternType, value: i64) {
        self.0[ty as usize] = value;
    }
}

/// Moves-to-win estimate for threat classification: 1 for patterns one stone
/// from a five, 2 for open threes. Everything else is not tracked.
pub fn threat_level(ty: PatternType) -> Option<u8> {
    match ty {
        PatternType::Open4
        | PatternType::Blocked4
        | PatternType::OpenBroken4
        | PatternType::BlockedBroken4
        | PatternType::OpenBroken5
        | PatternType::BlockedBroken5 => Some(1),
        PatternType::Open3 | PatternType::OpenBroken3 => Some(2),
        _ => None,
    }
}
