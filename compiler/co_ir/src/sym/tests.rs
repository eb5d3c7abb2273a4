#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use pretty_assertions::assert_eq;

// === Interning ===

#[test]
fn get_twice_returns_same_record() {
    let pool = SymPool::new();
    let a = pool.get("hello").unwrap();
    assert_eq!(pool.len(), 1);
    let b = pool.get("hello").unwrap();
    assert_eq!(a, b);
    assert_eq!(pool.len(), 1);
}

#[test]
fn distinct_strings_are_distinct_syms() {
    let pool = SymPool::new();
    let a = pool.get("ab").unwrap();
    let b = pool.get("ba").unwrap();
    let c = pool.get("abc").unwrap();
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(pool.len(), 3);
}

#[test]
fn header_fields() {
    let pool = SymPool::new();
    let s = pool.get("hello").unwrap();
    assert_eq!(s.as_str(), "hello");
    assert_eq!(s.len(), 5);
    assert_eq!(s.flags(), 0);
    assert_eq!(s.hash_value(), sym_hash(b"hello"));
    assert!(!s.is_empty());
}

#[test]
fn empty_string_interns() {
    let pool = SymPool::new();
    let e = pool.get("").unwrap();
    assert!(e.is_empty());
    assert_eq!(pool.get("").unwrap(), e);
}

#[test]
fn equal_text_in_separate_pools_is_not_identical() {
    let p1 = SymPool::new();
    let p2 = SymPool::new();
    let a = p1.get("x").unwrap();
    let b = p2.get("x").unwrap();
    assert_ne!(a, b);
    assert_eq!(a.as_str(), b.as_str());
}

#[test]
fn find_never_inserts() {
    let pool = SymPool::new();
    assert!(pool.find("ghost").is_none());
    assert!(pool.is_empty());
    let g = pool.get("ghost").unwrap();
    assert_eq!(pool.find("ghost"), Some(g));
}

// === Base chains ===

#[test]
fn get_falls_back_to_base() {
    let base = Arc::new(SymPool::new());
    let s = base.get("shared").unwrap();
    let child = SymPool::with_base(Arc::clone(&base));
    assert_eq!(child.get("shared").unwrap(), s);
    assert!(child.is_empty());
}

#[test]
fn get_walks_whole_chain() {
    let syms1 = Arc::new(SymPool::new());
    let a1 = syms1.get("A").unwrap();
    let b1 = syms1.get("B").unwrap();
    let c1 = syms1.get("C").unwrap();

    let syms2 = Arc::new(SymPool::with_base(Arc::clone(&syms1)));
    let b2 = syms2.add("B").unwrap();
    let c2 = syms2.add("C").unwrap();
    assert_ne!(b1, b2);
    assert_ne!(c1, c2);

    let syms3 = SymPool::with_base(Arc::clone(&syms2));
    let c3 = syms3.add("C").unwrap();

    assert_eq!(syms3.get("A").unwrap(), a1);
    assert_eq!(syms3.get("B").unwrap(), b2);
    assert_eq!(syms3.get("C").unwrap(), c3);
    assert_eq!(syms2.get("C").unwrap(), c2);
    assert_eq!(syms3.len(), 1);
}

#[test]
fn add_skips_base_but_dedups_locally() {
    let base = Arc::new(SymPool::new());
    let in_base = base.get("x").unwrap();
    let child = SymPool::with_base(base);
    let local = child.add("x").unwrap();
    assert_ne!(local, in_base);
    assert_eq!(child.add("x").unwrap(), local);
    // get now finds the local record first
    assert_eq!(child.get("x").unwrap(), local);
}

// === Flags ===

#[test]
fn flagged_records_keep_flags() {
    let pool = SymPool::new();
    let kw = pool.add_flagged("break", 3).unwrap();
    assert_eq!(kw.flags(), 3);
    assert_eq!(kw.len(), 5);
    // re-adding cannot change flags
    let again = pool.add_flagged("break", 7).unwrap();
    assert_eq!(again, kw);
    assert_eq!(again.flags(), 3);
    assert_eq!(pool.get("break").unwrap().flags(), 3);
}

#[test]
fn max_flags_do_not_disturb_length() {
    let pool = SymPool::new();
    let s = pool.add_flagged("var", SYM_FLAGS_MAX).unwrap();
    assert_eq!(s.flags(), SYM_FLAGS_MAX);
    assert_eq!(s.len(), 3);
}

// === Repr ===

#[test]
fn repr_lists_sorted_entries_and_bases() {
    let base = Arc::new(SymPool::new());
    base.get("sea").unwrap();
    base.get("break").unwrap();
    let child = SymPool::with_base(Arc::clone(&base));
    child.add("zed").unwrap();
    child.add("alpha").unwrap();
    assert_eq!(base.repr(), r#"{"break", "sea"}"#);
    assert_eq!(child.repr(), r#"{"alpha", "zed"}, [base]: {"break", "sea"}"#);
    assert_eq!(SymPool::new().repr(), "{}");
}

// === Hashing ===

#[test]
fn hash_is_deterministic() {
    assert_eq!(sym_hash(b"hello"), sym_hash(b"hello"));
    assert_ne!(sym_hash(b"hello"), sym_hash(b"hellp"));
}

#[test]
fn sym_works_as_map_key() {
    use rustc_hash::FxHashMap;
    let pool = SymPool::new();
    let mut map = FxHashMap::default();
    map.insert(pool.get("k").unwrap(), 1);
    assert_eq!(map.get(&pool.get("k").unwrap()), Some(&1));
}

// === Concurrency ===

#[test]
fn concurrent_get_agrees() {
    let pool = SymPool::new();
    let names: Vec<String> = (0..64).map(|i| format!("name{i}")).collect();
    let results: Vec<Vec<Sym>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| names.iter().map(|n| pool.get(n).unwrap()).collect()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(pool.len(), names.len());
    for run in &results[1..] {
        assert_eq!(run, &results[0]);
    }
}

// === Byte strings ===

#[test]
fn non_utf8_bytes_intern() {
    let pool = SymPool::new();
    let raw: &[u8] = b"caf\xe9";
    let s = pool.get(raw).unwrap();
    assert_eq!(s.as_bytes(), raw);
    assert_eq!(s.len(), 4);
    assert_eq!(s.to_str(), None);
    assert_eq!(s.as_str(), "caf\u{fffd}");
    assert_eq!(pool.get(raw).unwrap(), s);
    assert_ne!(pool.get("caf\u{fffd}").unwrap(), s);
}

#[test]
fn str_and_bytes_name_the_same_symbol() {
    let pool = SymPool::new();
    let s = pool.get("name").unwrap();
    assert_eq!(pool.get(b"name").unwrap(), s);
    assert_eq!(s.to_str(), Some("name"));
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_sym {
    use super::super::SymPool;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identity_matches_text(a in ".{0,12}", b in ".{0,12}") {
            let pool = SymPool::new();
            let sa = pool.get(&a).unwrap();
            let sb = pool.get(&b).unwrap();
            prop_assert_eq!(sa == sb, a == b);
            prop_assert_eq!(pool.get(&a).unwrap(), sa);
        }

        #[test]
        fn byte_identity_matches_text(
            a in proptest::collection::vec(any::<u8>(), 0..12),
            b in proptest::collection::vec(any::<u8>(), 0..12),
        ) {
            let pool = SymPool::new();
            let sa = pool.get(&a).unwrap();
            let sb = pool.get(&b).unwrap();
            prop_assert_eq!(sa == sb, a == b);
            prop_assert_eq!(sa.as_bytes(), a.as_slice());
            prop_assert_eq!(pool.find(&a), Some(sa));
        }

        #[test]
        fn every_interned_string_is_findable(words in proptest::collection::vec("[a-z]{1,6}", 0..40)) {
            let pool = SymPool::new();
            let syms: Vec<_> = words.iter().map(|w| pool.get(w).unwrap()).collect();
            for (w, s) in words.iter().zip(&syms) {
                let found = pool.find(w);
                prop_assert_eq!(found.as_ref(), Some(s));
            }
        }
    }
}
