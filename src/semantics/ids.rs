use std::sync::atomic::{AtomicUsize, Ordering};

/// Prefix of every generated control ID.
pub const GENERATED_ID_PREFIX: &str = "_control";

/// Hands out `_control1`, `_control2`, ... for controls declared without an `ID`.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicUsize,
}

/// The generator used when a caller does not supply its own.
static PROCESS_IDS: IdGenerator = IdGenerator::new();

impl IdGenerator {
    pub const fn new() -> IdGenerator {
        IdGenerator::starting_at(1)
    }

    /// A generator whose first ID is `_control{first}`.
    pub const fn starting_at(first: usize) -> IdGenerator {
        IdGenerator {
            next: AtomicUsize::new(first),
        }
    }

    /// The generator shared by the whole process.
    pub fn global() -> &'static IdGenerator {
        &PROCESS_IDS
    }

    pub fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("generated control id {}{}", GENERATED_ID_PREFIX, n);
        format!("{}{}", GENERATED_ID_PREFIX, n)
    }

    /// Restarts numbering at `first`.
    pub fn reset(&self, first: usize) {
        self.next.store(first, Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase() {
        let ids = IdGenerator::new();

        assert_eq!(ids.next_id(), "_control1");
        assert_eq!(ids.next_id(), "_control2");
        assert_eq!(ids.next_id(), "_control3");
    }

    #[test]
    fn test_seed_and_reset() {
        let ids = IdGenerator::starting_at(40);
        assert_eq!(ids.next_id(), "_control40");

        ids.reset(7);
        assert_eq!(ids.next_id(), "_control7");
    }

    #[test]
    fn test_global_is_shared() {
        let first = IdGenerator::global().next_id();
        let second = IdGenerator::global().next_id();

        let number = |id: &str| -> usize { id[GENERATED_ID_PREFIX.len()..].parse().unwrap() };
        assert!(number(&second) > number(&first));
    }
}
