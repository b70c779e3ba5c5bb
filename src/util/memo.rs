//! Read-through memoization table shared by the normalizer and the phonetic encoder.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// String-keyed cache with concurrent reads.
///
/// A miss computes the value outside any lock and inserts it with
/// `or_insert`, so two threads racing on the same key may both compute but
/// only the first value is stored and every caller observes that value.
/// Poisoned locks are recovered: entries are pure functions of their key.
#[derive(Debug)]
pub struct MemoTable<V> {
    map: RwLock<HashMap<String, V>>,
}

impl<V> Default for MemoTable<V> {
    fn default() -> Self {
        Self {
            map: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> MemoTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce(&str) -> V,
    {
        {
            let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(v) = map.get(key) {
                return v.clone();
            }
        }
        let value = compute(key);
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        map.entry(key.to_string()).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.map
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn computes_once_per_key() {
        let memo: MemoTable<usize> = MemoTable::new();
        let calls = AtomicUsize::new(0);
        for _ in 0..3 {
            let v = memo.get_or_compute("abc", |k| {
                calls.fetch_add(1, Ordering::SeqCst);
                k.len()
            });
            assert_eq!(v, 3);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn clear_forces_recompute() {
        let memo: MemoTable<String> = MemoTable::new();
        memo.get_or_compute("x", |k| k.to_uppercase());
        assert!(!memo.is_empty());
        memo.clear();
        assert!(memo.is_empty());
        assert_eq!(memo.get_or_compute("x", |_| "y".into()), "y");
    }

    #[test]
    fn concurrent_inserts_store_one_value() {
        let memo: Arc<MemoTable<String>> = Arc::new(MemoTable::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let m = Arc::clone(&memo);
                std::thread::spawn(move || m.get_or_compute("k", |_| format!("v{}", i)))
            })
            .collect();
        let seen: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let stored = memo.get_or_compute("k", |_| "late".into());
        assert_eq!(memo.len(), 1);
        assert_ne!(stored, "late");
        assert!(seen.iter().all(|v| *v == stored));
    }
}
