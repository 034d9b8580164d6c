#![deny(unsafe_code)]

use std::collections::BTreeSet;

/// Surrogate key generator for one (table, column) pair within one
/// normalization run.
///
/// Seeded with every identifier already present in the column, it yields
/// decimal-counter identifiers that collide neither with explicit keys nor
/// with keys generated earlier in the same run. Two runs over the same input
/// are not required to produce identical keys.
#[derive(Debug)]
pub struct KeyGenerator {
    taken: BTreeSet<String>,
    next: u64,
}

impl KeyGenerator {
    pub fn new(existing_values: BTreeSet<String>) -> Self {
        Self {
            taken: existing_values,
            next: 0,
        }
    }

    pub fn generate(&mut self) -> String {
        loop {
            let candidate = self.next.to_string();
            self.next += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn skips_explicit_values() {
        let existing: BTreeSet<String> = ["0", "2"].iter().map(|s| s.to_string()).collect();
        let mut generator = KeyGenerator::new(existing);
        assert_eq!(generator.generate(), "1");
        assert_eq!(generator.generate(), "3");
        assert_eq!(generator.generate(), "4");
    }

    #[test]
    fn starts_from_zero_on_empty_table() {
        let mut generator = KeyGenerator::new(BTreeSet::new());
        assert_eq!(generator.generate(), "0");
        assert_eq!(generator.generate(), "1");
    }

    proptest! {
        #[test]
        fn generated_keys_never_collide(
            existing in proptest::collection::btree_set("[0-9]{1,4}", 0..50),
            count in 1usize..100,
        ) {
            let explicit = existing.clone();
            let mut generator = KeyGenerator::new(existing);
            let mut generated = BTreeSet::new();
            for _ in 0..count {
                let key = generator.generate();
                prop_assert!(!explicit.contains(&key), "collided with explicit key {key}");
                prop_assert!(generated.insert(key), "generated a key twice");
            }
        }
    }
}
