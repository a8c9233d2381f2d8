/// Bound kind stored with a cached search value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    /// Full-window value.
    Exact,
    /// Fail-high: the true value is at least the stored one.
    Lower,
    /// Fail-low: the true value is at most the stored one.
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: u32,
    pub value: i64,
    pub bound: Bound,
    gen: u8,
}

const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Default)]
struct Bucket {
    entries: [Option<Entry>; BUCKET_SIZE],
}

/// Depth-preferred transposition table. Buckets of four entries; a store
/// replaces the same key when at least as deep, otherwise evicts the
/// shallowest entry from the oldest generation. Single-threaded, no locking.
pub struct Tt {
    buckets: Vec<Bucket>,
    mask: usize,
    generation: u8,
}

impl Tt {
    /// Build a table with at least `entries` slots, rounded up to a power
    /// of two bucket count.
    pub fn with_capacity_entries(entries: usize) -> Tt {
        let buckets = (entries / BUCKET_SIZE).next_power_of_two().max(1);
        Tt {
            buckets: vec![Bucket::default(); buckets],
            mask: buckets - 1,
            generation: 0,
        }
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = Bucket::default();
        }
        self.generation = 0;
    }

    /// Age out previous search iterations without erasing them.
    pub fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        let bucket = &self.buckets[(key as usize) & self.mask];
        bucket
            .entries
            .iter()
            .flatten()
            .find(|entry| entry.key == key)
            .copied()
    }

    pub fn put(&mut self, key: u64, depth: u32, value: i64, bound: Bound) {
        let generation = self.generation;
        let bucket = &mut self.buckets[(key as usize) & self.mask];
        let entry = Entry {
            key,
            depth,
            value,
            bound,
            gen: generation,
        };

        // Same key: keep the deeper of the two.
        for slot in &mut bucket.entries {
            if let Some(existing) = slot {
                if existing.key == key {
                    if depth >= existing.depth {
                        *slot = Some(entry);
                    }
                    return;
                }
            }
        }

        // Empty slot, then the shallowest entry of the oldest generation.
        if let Some(slot) = bucket.entries.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(entry);
            return;
        }
        let victim = bucket
            .entries
            .iter_mut()
            .min_by_key(|slot| {
                let existing = slot.as_ref().unwrap();
                let age = generation.wrapping_sub(existing.gen);
                (u8::MAX - age, existing.depth)
            })
            .unwrap();
        *victim = Some(entry);
    }
}
