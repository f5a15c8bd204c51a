//! Dictionary: word -> occurrence count over an ordered `SlotTable`.

use crate::config::DictionaryConfig;
use crate::hash::word_hash;
use crate::slot_table::{Probe, SlotTable, WordRecord};

/// Capacity used by `Dictionary::new`.
pub const DEFAULT_CAPACITY: usize = 1000;
/// Smallest table ever allocated; smaller hints are rounded up.
pub const MIN_CAPACITY: usize = 8;

/// Counts occurrences of distinct words.
///
/// Every operation is total: the empty word is a no-op that reports 0, and
/// an absent word reports 0 from `find`/`remove`. The table doubles before
/// a new word would push the load factor past 3/4.
#[derive(Debug)]
pub struct Dictionary {
    table: SlotTable,
    size: usize,
    config: DictionaryConfig,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(capacity, DictionaryConfig::default())
    }

    pub fn with_config(capacity: usize, config: DictionaryConfig) -> Self {
        Self {
            table: SlotTable::new(capacity.max(MIN_CAPACITY), config.refinement),
            size: 0,
            config,
        }
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn config(&self) -> DictionaryConfig {
        self.config
    }

    fn hash(&self, word: &str) -> f64 {
        word_hash(word, self.config.hash_precision)
    }

    /// Add `count` occurrences of `word` and return its total afterwards.
    ///
    /// Returns 0 for the empty word. A `count` of 0 stores nothing and
    /// returns the word's current count.
    pub fn insert(&mut self, word: &str, count: usize) -> usize {
        if word.is_empty() {
            return 0;
        }
        if count == 0 {
            return self.find(word);
        }
        let hash = self.hash(word);
        let mut start = match self.table.probe(hash, word) {
            Probe::Found(i) => {
                let Some(rec) = self.table.get_mut(i) else {
                    return 0;
                };
                let total = rec.count_mut();
                *total = total.saturating_add(count);
                return *total;
            }
            Probe::Vacant(i) => Some(i),
        };

        if 4 * (self.size + 1) > 3 * self.capacity() {
            self.grow();
            start = None;
        }
        let mut pending = WordRecord::new(word, count, hash);
        // The vacant index is only valid until the table is rebuilt;
        // each retry runs against a strictly larger table.
        loop {
            let placed = match start.take() {
                Some(i) => self.table.place_at(i, pending),
                None => self.table.place(pending),
            };
            match placed {
                Ok(_) => break,
                Err(left_over) => {
                    self.grow();
                    pending = left_over;
                }
            }
        }
        self.size += 1;
        count
    }

    /// Occurrence count of `word`, or 0 if absent.
    pub fn find(&self, word: &str) -> usize {
        if word.is_empty() {
            return 0;
        }
        match self.table.probe(self.hash(word), word) {
            Probe::Found(i) => self.table.get(i).map_or(0, WordRecord::count),
            Probe::Vacant(_) => 0,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.find(word) > 0
    }

    /// Remove `count` occurrences of `word` and return how many remain.
    ///
    /// When `count` covers every occurrence the word is deleted and 0 is
    /// returned; pass `usize::MAX` (or use `remove_all`) to delete outright.
    pub fn remove(&mut self, word: &str, count: usize) -> usize {
        if word.is_empty() {
            return 0;
        }
        let i = match self.table.probe(self.hash(word), word) {
            Probe::Found(i) => i,
            Probe::Vacant(_) => return 0,
        };
        let Some(rec) = self.table.get_mut(i) else {
            return 0;
        };
        if count < rec.count() {
            let remaining = rec.count_mut();
            *remaining -= count;
            return *remaining;
        }
        if self.table.remove_at(i).is_some() {
            self.size -= 1;
        }
        0
    }

    /// Delete `word` regardless of its count.
    pub fn remove_all(&mut self, word: &str) -> usize {
        self.remove(word, usize::MAX)
    }

    /// Insert each token once; returns how many tokens were consumed.
    pub fn insert_all<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens = 0;
        for w in words {
            self.insert(w.as_ref(), 1);
            tokens += 1;
        }
        tokens
    }

    /// `(word, count)` pairs in table storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.table.iter().map(|r| (r.text(), r.count()))
    }

    /// Stored records in table storage order.
    pub fn records(&self) -> impl Iterator<Item = &WordRecord> + '_ {
        self.table.iter()
    }

    /// Double the capacity and move every record into the new table. A
    /// rebuild that overflows its own sentinel doubles again.
    fn grow(&mut self) {
        let old_capacity = self.capacity();
        let refine = self.table.refine();
        let mut capacity = double(old_capacity);
        let old = std::mem::replace(&mut self.table, SlotTable::new(1, refine));
        let mut pending: Vec<WordRecord> = old.into_records().collect();
        loop {
            let mut table = SlotTable::new(capacity, refine);
            let mut rest = pending.into_iter();
            let overflow = rest.by_ref().find_map(|rec| table.place(rec).err());
            match overflow {
                None => {
                    self.table = table;
                    break;
                }
                Some(left_over) => {
                    pending = table
                        .into_records()
                        .chain(std::iter::once(left_over))
                        .chain(rest)
                        .collect();
                    capacity = double(capacity);
                }
            }
        }
        log::debug!(
            "dictionary grew from {} to {} slots ({} words)",
            old_capacity,
            self.capacity(),
            self.size
        );
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        self.table.assert_ordered();
        assert_eq!(self.table.iter().count(), self.size, "size counter drifted");
        assert!(
            4 * self.size <= 3 * self.capacity(),
            "load factor exceeded: {} / {}",
            self.size,
            self.capacity()
        );
        for rec in self.table.iter() {
            assert!(rec.count() >= 1, "{:?} stored with count 0", rec.text());
        }
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AsRef<str>> Extend<S> for Dictionary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

fn double(capacity: usize) -> usize {
    capacity
        .checked_mul(2)
        .expect("dictionary capacity overflowed usize")
}
