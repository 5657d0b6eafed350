//! chained-table: a single-threaded separate-chaining hash set with
//! prime-sized bucket arrays, plus the movie-title timing harness that
//! drives it.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedHashTable<K, S>` stores unique keys in a `Vec` of chains.
//!   A key goes to bucket `hash % bucket_count`; the chain is scanned
//!   with `K: Eq` to find it.
//! - Bucket counts come from `primes::next_prime`: the initial count is
//!   the next prime at or above the capacity hint (default 101), and each
//!   rehash moves to the next prime at or above twice the old count.
//!
//! Growth
//! - Rehash triggers inside `insert` once `len > bucket_count`. The old
//!   bucket vector is taken by value, a new one swapped in, and every
//!   slot reinserted through the same deduplicating path `insert` uses.
//!   Each key moves O(log n) times over the table's life, so insert is
//!   amortised O(1).
//! - There is no shrink. `remove` and `clear` leave the bucket count
//!   alone.
//!
//! Hashing
//! - Each slot stores the `u64` hash computed when its key was inserted.
//!   Rehash routes by the stored hash, so `K: Hash` never runs during a
//!   rehash, and chain scans compare hashes before calling `K: Eq`.
//! - Hashes are unsigned, so `hash % len` needs no sign correction.
//!
//! Constraints
//! - Single-threaded; mutation takes `&mut self`.
//! - No operation fails. Absent keys on `remove` and duplicate inserts
//!   are no-ops that return `false`.
//! - Reentrancy: calling back into the same table from `K: Eq`/`K: Hash`
//!   panics in debug builds (see `reentrancy`).
//!
//! Harness
//! - `parser` reads the eight-column movie CSV, `harness` runs the
//!   sorted/shuffled/reversed phases against a fresh table each and
//!   appends `label,items,insert,search,delete` lines to a log file.
//!   The `table_timing` binary wraps it in a CLI.

pub mod chained_hash_table;
mod chained_hash_table_proptest;
pub mod error;
pub mod harness;
pub mod movie;
pub mod parser;
pub mod primes;
mod reentrancy;

// Public surface
pub use chained_hash_table::{ChainedHashTable, Iter, DEFAULT_CAPACITY};
pub use error::HarnessError;
pub use movie::Movie;
