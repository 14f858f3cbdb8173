use std::sync::RwLock;

/// Insertion-ordered keyed rows behind a lock.
///
/// A poisoned lock reads as empty and drops writes; the rows are disposable.
#[derive(Debug)]
pub struct InMemoryTable<K, V> {
    rows: RwLock<Vec<(K, V)>>,
}

impl<K, V> InMemoryTable<K, V> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<K, V> Default for InMemoryTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryTable<K, V>
where
    K: PartialEq,
    V: Clone,
{
    pub fn get(&self, key: &K) -> Option<V> {
        let rows = self.rows.read().ok()?;
        rows.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    /// Replace the row in place, or append it when the key is new.
    pub fn upsert(&self, key: K, value: V) {
        if let Ok(mut rows) = self.rows.write() {
            match rows.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => rows.push((key, value)),
            }
        }
    }

    /// Mutate an existing row; returns the updated value.
    pub fn update<F>(&self, key: &K, f: F) -> Option<V>
    where
        F: FnOnce(&mut V),
    {
        let mut rows = self.rows.write().ok()?;
        let (_, value) = rows.iter_mut().find(|(k, _)| k == key)?;
        f(value);
        Some(value.clone())
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut rows = self.rows.write().ok()?;
        let idx = rows.iter().position(|(k, _)| k == key)?;
        Some(rows.remove(idx).1)
    }

    pub fn find<P>(&self, pred: P) -> Option<V>
    where
        P: Fn(&V) -> bool,
    {
        let rows = self.rows.read().ok()?;
        rows.iter().map(|(_, v)| v).find(|v| pred(v)).cloned()
    }

    /// Matching rows, most recently inserted first.
    pub fn filter_newest_first<P>(&self, pred: P) -> Vec<V>
    where
        P: Fn(&V) -> bool,
    {
        let rows = match self.rows.read() {
            Ok(r) => r,
            Err(_) => return vec![],
        };
        rows.iter().rev().map(|(_, v)| v).filter(|v| pred(v)).cloned().collect()
    }

    pub fn retain<P>(&self, pred: P)
    where
        P: Fn(&V) -> bool,
    {
        if let Ok(mut rows) = self.rows.write() {
            rows.retain(|(_, v)| pred(v));
        }
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_key() {
        let table = InMemoryTable::new();
        table.upsert(1, "a");
        table.upsert(2, "b");
        table.upsert(1, "c");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&1), Some("c"));
    }

    #[test]
    fn newest_first_reverses_insertion_order() {
        let table = InMemoryTable::new();
        for i in 0..4 {
            table.upsert(i, i * 10);
        }
        assert_eq!(table.filter_newest_first(|v| *v >= 10), vec![30, 20, 10]);
    }

    #[test]
    fn update_missing_key_returns_none() {
        let table: InMemoryTable<u8, u8> = InMemoryTable::new();
        assert_eq!(table.update(&9, |v| *v += 1), None);
    }

    #[test]
    fn remove_and_retain_drop_rows() {
        let table = InMemoryTable::new();
        table.upsert("x", 1);
        table.upsert("y", 2);
        table.upsert("z", 3);
        assert_eq!(table.remove(&"y"), Some(2));
        table.retain(|v| *v != 3);
        assert_eq!(table.filter_newest_first(|_| true), vec![1]);
    }
}
