//! SlotTable: fixed-capacity open-addressing storage kept in hash order.
//!
//! Invariants
//! - `slots.len() == capacity + 1`; the last slot is a sentinel that is
//!   never occupied. Probes stop there, and reaching it means the table is
//!   full for the record being placed.
//! - Every occupied slot `i` holding a record with ideal index `j` has
//!   slots `j..i` occupied, and keys strictly increase along each
//!   contiguous occupied run. The key is the hash, or `(hash, text)` when
//!   refinement is enabled.

use core::cmp::Ordering;

/// One distinct word and its occurrence count. Owned by exactly one slot.
#[derive(Debug)]
pub struct WordRecord {
    hash: f64,
    count: usize,
    text: Box<str>,
}

impl WordRecord {
    pub(crate) fn new(text: &str, count: usize, hash: f64) -> Self {
        Self {
            hash,
            count,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn hash(&self) -> f64 {
        self.hash
    }

    pub(crate) fn count_mut(&mut self) -> &mut usize {
        &mut self.count
    }
}

/// Outcome of an ordered scan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// The key is stored at this index.
    Found(usize),
    /// The key is absent and belongs at this index: either an empty slot
    /// (possibly the sentinel) or the first occupant ordered after it.
    Vacant(usize),
}

#[derive(Debug)]
pub(crate) struct SlotTable {
    slots: Vec<Option<WordRecord>>,
    refine: bool,
}

impl SlotTable {
    pub(crate) fn new(capacity: usize, refine: bool) -> Self {
        debug_assert!(capacity > 0, "slot table needs at least one slot");
        let slots = std::iter::repeat_with(|| None)
            .take(capacity + 1)
            .collect();
        Self { slots, refine }
    }

    /// Nominal capacity, excluding the sentinel.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    /// `floor(hash * capacity)`, clamped below the sentinel.
    #[inline]
    pub(crate) fn ideal(&self, hash: f64) -> usize {
        let cap = self.capacity();
        ((hash * cap as f64) as usize).min(cap - 1)
    }

    #[inline]
    fn order(&self, rec: &WordRecord, hash: f64, text: &str) -> Ordering {
        let by_hash = rec.hash.total_cmp(&hash);
        if self.refine {
            by_hash.then_with(|| (*rec.text).cmp(text))
        } else {
            by_hash
        }
    }

    /// Scan forward from the ideal index past every occupant ordered
    /// before `(hash, text)`.
    pub(crate) fn probe(&self, hash: f64, text: &str) -> Probe {
        let mut i = self.ideal(hash);
        while let Some(rec) = &self.slots[i] {
            match self.order(rec, hash, text) {
                Ordering::Less => i += 1,
                Ordering::Equal => return Probe::Found(i),
                Ordering::Greater => break,
            }
        }
        Probe::Vacant(i)
    }

    pub(crate) fn get(&self, i: usize) -> Option<&WordRecord> {
        self.slots.get(i).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, i: usize) -> Option<&mut WordRecord> {
        self.slots.get_mut(i).and_then(Option::as_mut)
    }

    /// Place a record whose key is not in the table, probing for its
    /// position first. See `place_at` for the overflow contract.
    pub(crate) fn place(&mut self, record: WordRecord) -> Result<usize, WordRecord> {
        let start = match self.probe(record.hash, &record.text) {
            Probe::Vacant(i) => i,
            Probe::Found(i) => {
                debug_assert!(false, "place() called for a key already stored");
                i
            }
        };
        self.place_at(start, record)
    }

    /// Place a record at `start`, the `Probe::Vacant` index for its key.
    ///
    /// Every occupant from there up to the next empty slot moves forward by
    /// one. If that walk reaches the sentinel, the record left in hand is
    /// returned as `Err` (the new record itself if nothing moved) and the
    /// table holds every other record, still ordered.
    pub(crate) fn place_at(&mut self, start: usize, record: WordRecord) -> Result<usize, WordRecord> {
        debug_assert_eq!(self.probe(record.hash, &record.text), Probe::Vacant(start));
        let cap = self.capacity();
        let mut carry = record;
        let mut i = start;
        loop {
            if i == cap {
                return Err(carry);
            }
            match self.slots[i].replace(carry) {
                None => return Ok(start),
                Some(displaced) => {
                    carry = displaced;
                    i += 1;
                }
            }
        }
    }

    /// Take the record at `gap` and close the hole: each following
    /// occupant whose ideal index is at or before the hole shifts back one
    /// slot, stopping at an empty slot or an occupant already past it.
    pub(crate) fn remove_at(&mut self, mut gap: usize) -> Option<WordRecord> {
        let removed = self.slots[gap].take()?;
        loop {
            // gap < capacity, so gap + 1 is at most the sentinel
            let next_ideal = match &self.slots[gap + 1] {
                Some(next) => self.ideal(next.hash),
                None => break,
            };
            if next_ideal > gap {
                break;
            }
            self.slots[gap] = self.slots[gap + 1].take();
            gap += 1;
        }
        Some(removed)
    }

    /// Occupied records in storage order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &WordRecord> {
        self.slots.iter().flatten()
    }

    /// Move every record out, in storage order.
    pub(crate) fn into_records(self) -> impl Iterator<Item = WordRecord> {
        self.slots.into_iter().flatten()
    }

    pub(crate) fn refine(&self) -> bool {
        self.refine
    }

    /// Panics with a description of the first violated invariant.
    #[cfg(test)]
    pub(crate) fn assert_ordered(&self) {
        let cap = self.capacity();
        assert!(self.slots[cap].is_none(), "sentinel slot is occupied");
        for (i, slot) in self.slots.iter().enumerate() {
            let Some(rec) = slot else { continue };
            let ideal = self.ideal(rec.hash);
            assert!(ideal <= i, "{:?} at {} sits before its ideal {}", rec.text, i, ideal);
            for j in ideal..i {
                assert!(
                    self.slots[j].is_some(),
                    "gap at {} between ideal {} and {:?} at {}",
                    j,
                    ideal,
                    rec.text,
                    i
                );
            }
            if i > 0 {
                if let Some(prev) = &self.slots[i - 1] {
                    assert_eq!(
                        self.order(prev, rec.hash, &rec.text),
                        Ordering::Less,
                        "{:?} at {} is not ordered before {:?}",
                        prev.text,
                        i - 1,
                        rec.text
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(text: &str, hash: f64) -> WordRecord {
        WordRecord::new(text, 1, hash)
    }

    fn layout(t: &SlotTable) -> Vec<Option<&str>> {
        t.slots.iter().map(|s| s.as_ref().map(|r| r.text())).collect()
    }

    #[test]
    fn place_keeps_runs_sorted_by_hash() {
        let mut t = SlotTable::new(4, true);
        assert_eq!(t.place(rec("c", 0.3)).unwrap(), 1);
        assert_eq!(t.place(rec("a", 0.1)).unwrap(), 0);
        // belongs between a and c, so c ripples forward
        assert_eq!(t.place(rec("b", 0.15)).unwrap(), 1);
        assert_eq!(layout(&t), vec![Some("a"), Some("b"), Some("c"), None, None]);
        t.assert_ordered();
    }

    #[test]
    fn probe_reports_found_and_insertion_point() {
        let mut t = SlotTable::new(4, true);
        t.place(rec("a", 0.1)).unwrap();
        t.place(rec("c", 0.2)).unwrap();
        assert_eq!(t.probe(0.1, "a"), Probe::Found(0));
        assert_eq!(t.probe(0.2, "c"), Probe::Found(1));
        assert_eq!(t.probe(0.15, "b"), Probe::Vacant(1));
        assert_eq!(t.probe(0.9, "z"), Probe::Vacant(3));
    }

    #[test]
    fn refinement_orders_equal_hashes_by_text() {
        let mut t = SlotTable::new(4, true);
        t.place(rec("beta", 0.5)).unwrap();
        t.place(rec("alpha", 0.5)).unwrap();
        assert_eq!(layout(&t)[2..4], [Some("alpha"), Some("beta")]);
        assert_eq!(t.probe(0.5, "beta"), Probe::Found(3));
        assert_eq!(t.probe(0.5, "gamma"), Probe::Vacant(4));
        t.assert_ordered();
    }

    #[test]
    fn without_refinement_equal_hashes_match() {
        let mut t = SlotTable::new(4, false);
        t.place(rec("alpha", 0.5)).unwrap();
        assert_eq!(t.probe(0.5, "beta"), Probe::Found(2));
    }

    #[test]
    fn landing_on_sentinel_returns_the_new_record() {
        let mut t = SlotTable::new(2, true);
        t.place(rec("x", 0.6)).unwrap();
        let back = t.place(rec("y", 0.7)).unwrap_err();
        assert_eq!(back.text(), "y");
        assert_eq!(layout(&t), vec![None, Some("x"), None]);
    }

    #[test]
    fn ripple_into_sentinel_returns_the_last_displaced() {
        let mut t = SlotTable::new(2, true);
        t.place(rec("x", 0.6)).unwrap();
        let back = t.place(rec("w", 0.55)).unwrap_err();
        assert_eq!(back.text(), "x");
        assert_eq!(layout(&t), vec![None, Some("w"), None]);
        t.assert_ordered();
    }

    #[test]
    fn place_at_ripples_from_given_slot() {
        let mut t = SlotTable::new(4, true);
        t.place(rec("a", 0.1)).unwrap();
        t.place(rec("c", 0.2)).unwrap();
        let start = match t.probe(0.15, "b") {
            Probe::Vacant(i) => i,
            found => panic!("expected a vacant slot, got {:?}", found),
        };
        assert_eq!(t.place_at(start, rec("b", 0.15)).unwrap(), 1);
        assert_eq!(layout(&t), vec![Some("a"), Some("b"), Some("c"), None, None]);
        t.assert_ordered();

        let end = match t.probe(0.9, "z") {
            Probe::Vacant(i) => i,
            found => panic!("expected a vacant slot, got {:?}", found),
        };
        assert_eq!(t.place_at(end, rec("z", 0.9)).unwrap(), 3);
        t.assert_ordered();
    }

    #[test]
    fn remove_compacts_displaced_followers() {
        let mut t = SlotTable::new(4, true);
        t.place(rec("a", 0.1)).unwrap();
        t.place(rec("b", 0.15)).unwrap();
        t.place(rec("c", 0.3)).unwrap();
        let gone = t.remove_at(0).unwrap();
        assert_eq!(gone.text(), "a");
        assert_eq!(layout(&t), vec![Some("b"), Some("c"), None, None, None]);
        t.assert_ordered();
    }

    #[test]
    fn remove_stops_at_record_in_its_ideal_slot() {
        let mut t = SlotTable::new(4, true);
        t.place(rec("a", 0.1)).unwrap();
        t.place(rec("b", 0.3)).unwrap();
        t.place(rec("c", 0.55)).unwrap();
        t.remove_at(1).unwrap();
        assert_eq!(layout(&t), vec![Some("a"), None, Some("c"), None, None]);
        assert_eq!(t.probe(0.55, "c"), Probe::Found(2));
        t.assert_ordered();
    }

    #[test]
    fn remove_empty_slot_is_none() {
        let mut t = SlotTable::new(4, true);
        assert!(t.remove_at(2).is_none());
    }

    #[test]
    fn into_records_moves_everything_in_order() {
        let mut t = SlotTable::new(8, true);
        for (w, h) in [("d", 0.9), ("a", 0.05), ("c", 0.5), ("b", 0.06)] {
            t.place(rec(w, h)).unwrap();
        }
        let texts: Vec<String> = t.into_records().map(|r| r.text().to_string()).collect();
        assert_eq!(texts, ["a", "b", "c", "d"]);
    }
}
