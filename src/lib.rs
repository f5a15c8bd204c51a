//! zipf-dict: word concordance over an order-preserving open-addressing
//! dictionary, with Zipf's-law frequency reports.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: count words with a table whose slot order follows hash order,
//!   so probing stops early, deletion can compact without tombstones, and
//!   iteration is deterministic for a given configuration.
//! - Layers:
//!   - `hash`: maps a word to a real number in `[0, 1)` by reading it as
//!     a base-27 fraction. Hash order follows word order up to the
//!     precision limit.
//!   - `SlotTable`: `capacity + 1` slots of `Option<WordRecord>`, the last
//!     a sentinel that is never filled. Placement ripples occupants forward
//!     to keep each run sorted; removal shifts followers back.
//!   - `Dictionary`: owns the table and the size counter, applies the
//!     3/4 load-factor policy, and grows by doubling.
//!   - `FrequencyReport`: groups a finished dictionary by count and writes
//!     the text concordance and the CSV table.
//!
//! Constraints
//! - Single-threaded; no interior mutability.
//! - Keys are lowercase ASCII words with interior apostrophes. Other bytes
//!   are accepted but hash as apostrophes.
//! - Every dictionary operation is total. Absent or empty words report 0.
//!
//! Ordering invariant
//! - Let `ideal(h) = floor(h * capacity)`. For a record at slot `i`,
//!   slots `ideal(h)..i` are occupied and keys strictly increase along
//!   every contiguous occupied run. The key is the hash, or `(hash, text)`
//!   when refinement is on. Since `ideal` is monotone, a lookup can stop
//!   at the first empty slot or larger key.
//!
//! Growth
//! - An insert of a new word first doubles the table if the word would
//!   push `size / capacity` past 3/4.
//! - Placement that runs into the sentinel also doubles the table; the
//!   record left over is placed again. Rebuilding moves every record into
//!   the new table without cloning. The retry loop terminates because the
//!   capacity strictly increases.
//!
//! Precision and refinement
//! - `HashPrecision::Double` is exact for 11 characters and `Single` for
//!   5. Longer words that share that prefix collide. With refinement
//!   (the default) exact string comparison breaks such ties; without it
//!   they count as one word.
//!
//! Notes and non-goals
//! - No shrinking: removal never reduces capacity.
//! - Not a general-purpose map; keys are `&str` only.
//! - Allocation failure while growing aborts, as with any `Vec`.

mod config;
mod dictionary;
mod dictionary_proptest;
mod error;
pub mod hash;
mod report;
mod slot_table;
pub mod tokenizer;

// Public surface
pub use config::{capacity_hint, DictionaryConfig, BYTES_PER_SLOT};
pub use dictionary::{Dictionary, DEFAULT_CAPACITY, MIN_CAPACITY};
pub use error::{Result, ZipfError};
pub use hash::{word_hash, HashPrecision};
pub use report::{FrequencyGroup, FrequencyReport, ReportHeader};
pub use slot_table::WordRecord;
pub use tokenizer::{words, Words};
