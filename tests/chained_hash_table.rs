// ChainedHashTable unit test suite (public API only).
//
// Each test documents which behavior it verifies. The core invariants:
// - Uniqueness: a key is present iff inserted and not since removed;
//   duplicate inserts never change len().
// - Resize transparency: keys survive any number of rehashes.
// - Prime sizing: bucket_count() is prime and at least doubles per rehash.
// - Clear: logical reset without shrinking.
use chained_table::primes::is_prime;
use chained_table::{ChainedHashTable, DEFAULT_CAPACITY};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{BuildHasherDefault, Hash, Hasher};

// Test: concrete scenario from the movie-title workload.
// Verifies: duplicates collapse; String keys compare case-sensitively.
#[test]
fn titles_deduplicate_case_sensitively() {
    let mut t = ChainedHashTable::new();
    for title in ["Inception", "Up", "Up", "Coco"] {
        t.insert(title.to_string());
    }
    assert_eq!(t.len(), 3);
    assert_eq!(t.bucket_count(), DEFAULT_CAPACITY);
    assert!(t.contains("Up"));
    assert!(!t.contains("UP"));
}

// Test: rehash trigger at load factor > 1.0.
// Verifies: hint 5 gives 5 buckets; the sixth distinct key moves to 11.
#[test]
fn rehash_trigger_from_five_buckets() {
    let mut t = ChainedHashTable::with_capacity(5);
    for i in 0..6 {
        t.insert(i);
        let expected = if i < 5 { 5 } else { 11 };
        assert_eq!(t.bucket_count(), expected, "after inserting {i}");
    }
    assert!((0..6).all(|i| t.contains(&i)));
}

// Test: resize transparency over many rehashes with interleaved removals.
// Verifies: every live key is found; every removed key is not.
#[test]
fn keys_survive_many_rehashes() {
    let mut t = ChainedHashTable::with_capacity(1);
    let mut prev = t.bucket_count();
    let mut growths = 0;
    for i in 0..20_000u32 {
        t.insert(i);
        if i % 3 == 0 {
            t.remove(&(i / 2));
        }
        let now = t.bucket_count();
        if now != prev {
            assert!(is_prime(now));
            assert!(now >= 2 * prev);
            prev = now;
            growths += 1;
        }
    }
    assert!(growths >= 10);
    let removed: HashSet<u32> = (0..20_000u32).filter(|i| i % 3 == 0).map(|i| i / 2).collect();
    assert_eq!(t.len(), 20_000 - removed.len());
    for k in 0..20_000u32 {
        assert_eq!(t.contains(&k), !removed.contains(&k), "key {k}");
    }
}

// Test: idempotence of insert and remove.
#[test]
fn insert_and_remove_twice() {
    let mut t: ChainedHashTable<&str> = ChainedHashTable::new();
    t.insert("k");
    t.insert("k");
    assert_eq!(t.len(), 1);
    t.remove(&"k");
    t.remove(&"k");
    assert_eq!(t.len(), 0);
    assert!(!t.contains(&"k"));
}

// Test: clear is a logical reset.
// Verifies: len 0, bucket count unchanged, table usable afterwards.
#[test]
fn clear_then_reuse() {
    let mut t: ChainedHashTable<String> = (0..500).map(|i| i.to_string()).collect();
    let buckets = t.bucket_count();
    t.clear();
    assert!(t.is_empty());
    assert_eq!(t.bucket_count(), buckets);
    assert_eq!(t.iter().count(), 0);
    t.extend(["a".to_string(), "b".to_string()]);
    assert_eq!(t.len(), 2);
}

// Test: a deterministic hasher makes two tables agree bucket for bucket.
// Verifies: with_hasher plumbing and that iteration order depends only on
// the hash and insertion history, not on the instance.
#[test]
fn deterministic_hasher_gives_identical_layout() {
    type Fixed = BuildHasherDefault<DefaultHasher>;
    let keys: Vec<String> = (0..300).map(|i| format!("movie-{i}")).collect();
    let mut a: ChainedHashTable<String, Fixed> = ChainedHashTable::with_hasher(Fixed::default());
    let mut b: ChainedHashTable<String, Fixed> = ChainedHashTable::with_hasher(Fixed::default());
    a.extend(keys.iter().cloned());
    b.extend(keys.iter().cloned());
    let ia: Vec<_> = a.iter().collect();
    let ib: Vec<_> = b.iter().collect();
    assert_eq!(ia, ib);
}

// Test: a user key type whose equality folds case.
// Assumes: Hash agrees with that equality.
// Verifies: case folding is a key-type property; the table just obeys it.
#[test]
fn key_type_defines_equality() {
    #[derive(Debug)]
    struct Folded(String);
    impl PartialEq for Folded {
        fn eq(&self, other: &Self) -> bool {
            self.0.eq_ignore_ascii_case(&other.0)
        }
    }
    impl Eq for Folded {}
    impl Hash for Folded {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.0.to_ascii_lowercase().hash(state);
        }
    }

    let mut t = ChainedHashTable::new();
    t.insert(Folded("Up".into()));
    assert!(!t.insert(Folded("UP".into())));
    assert!(t.contains(&Folded("uP".into())));
    assert_eq!(t.len(), 1);
}

// Test: Clone produces an independent table.
#[test]
fn clone_is_independent() {
    let mut a: ChainedHashTable<u32> = (0..10).collect();
    let b = a.clone();
    a.remove(&3);
    assert!(!a.contains(&3));
    assert!(b.contains(&3));
    assert_eq!(b.len(), 10);
    assert_eq!(a.bucket_count(), b.bucket_count());
}
