//! Symbol interning.
//!
//! A [`Sym`] is an immutable byte string interned in a [`SymPool`]. Within
//! a pool chain each distinct string has exactly one record, so comparing
//! two Syms is a pointer comparison. Text is usually UTF-8, but identifier
//! bytes from a non-UTF-8 source intern just the same.
//!
//! # Layout
//!
//! Every record carries an 8-byte header next to its text:
//!
//! ```text
//! +------------------+---------------------------+
//! | hash: u32        | flags:5 | len:27          |
//! +------------------+---------------------------+
//! ```
//!
//! The flag bits are free for the language layer; Co stores the keyword
//! index there (see [`crate::langtok`]).
//!
//! # Pool chains
//!
//! A pool may have a read-only base pool. Lookups fall back through the
//! chain, insertions always go into the pool they are called on. Package
//! pools sit on top of the shared universe pool.
//!
//! # Thread Safety
//!
//! The tree is guarded by a `RwLock`. Lookups take the read lock;
//! insertion re-checks under the write lock, so two threads racing to add
//! the same string both get the same record back.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use tracing::trace;

use crate::AllocError;

const SYM_LEN_BITS: u32 = 27;
const SYM_LEN_MASK: u32 = (1 << SYM_LEN_BITS) - 1;

/// Longest string a Sym can hold, in bytes.
pub const SYM_LEN_MAX: u32 = SYM_LEN_MASK;

/// Largest value of the 5-bit flag field.
pub const SYM_FLAGS_MAX: u8 = 31;

/// Seed mixed into every symbol hash.
const SYM_HASH_SEED: u32 = 578;

/// Hash used for pool ordering.
#[expect(
    clippy::cast_possible_truncation,
    reason = "64-bit hash is folded down to 32 bits"
)]
pub(crate) fn sym_hash(text: &[u8]) -> u32 {
    let mut hasher = FxHasher::default();
    hasher.write_u32(SYM_HASH_SEED);
    hasher.write(text);
    let h = hasher.finish();
    (h ^ (h >> 32)) as u32
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymError {
    /// String does not fit the 27-bit length field.
    TooLong { len: usize },
    /// Record storage could not be allocated.
    Alloc(AllocError),
}

impl fmt::Display for SymError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymError::TooLong { len } => write!(
                f,
                "symbol of {len} bytes exceeds the maximum of {SYM_LEN_MAX} bytes"
            ),
            SymError::Alloc(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SymError {}

impl From<AllocError> for SymError {
    fn from(e: AllocError) -> Self {
        SymError::Alloc(e)
    }
}

struct SymRecord {
    hash: u32,
    /// Low 27 bits: length. High 5 bits: flags.
    len_flags: u32,
    text: Box<[u8]>,
}

/// An interned string.
///
/// Cloning is a reference-count bump. Equality is identity.
#[derive(Clone)]
pub struct Sym(Arc<SymRecord>);

impl Sym {
    /// The text, with invalid UTF-8 replaced by U+FFFD.
    #[inline]
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0.text)
    }

    /// The text if it is valid UTF-8.
    #[inline]
    pub fn to_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0.text).ok()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0.text
    }

    /// Length in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.0.len_flags & SYM_LEN_MASK
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The precomputed pool hash.
    #[inline]
    pub fn hash_value(&self) -> u32 {
        self.0.hash
    }

    /// The 5-bit flag field.
    #[inline]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "flags occupy the top 5 bits"
    )]
    pub fn flags(&self) -> u8 {
        (self.0.len_flags >> SYM_LEN_BITS) as u8
    }

    /// 1-based keyword index stored in the flags, 0 for plain names.
    #[inline]
    pub fn keyword_index(&self) -> u8 {
        self.flags()
    }

    /// Pool ordering: hash, then length, then bytes.
    fn cmp_key(&self, hash: u32, text: &[u8]) -> Ordering {
        self.0
            .hash
            .cmp(&hash)
            .then_with(|| self.as_bytes().len().cmp(&text.len()))
            .then_with(|| self.as_bytes().cmp(text))
    }
}

impl PartialEq for Sym {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Sym {}

impl Hash for Sym {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.hash);
    }
}

impl AsRef<[u8]> for Sym {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sym({:?})", self.as_str())
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// Ordered record storage.
///
/// Keyed by `(hash, len)`; each bucket holds the colliding records sorted
/// by bytes, which together gives the full hash/len/bytes order.
#[derive(Default)]
struct SymTree {
    buckets: BTreeMap<(u32, u32), SmallVec<[Sym; 1]>>,
    count: usize,
}

impl SymTree {
    /// Walk the tree with the pool comparator.
    ///
    /// `Ok` holds the existing record, `Err` the insertion slot within the
    /// bucket (which may not exist yet).
    fn locate(&self, hash: u32, text: &[u8]) -> Result<&Sym, usize> {
        let Some(bucket) = self.buckets.get(&(hash, bucket_len(text))) else {
            return Err(0);
        };
        match bucket.binary_search_by(|s| s.cmp_key(hash, text)) {
            Ok(i) => Ok(&bucket[i]),
            Err(i) => Err(i),
        }
    }

    fn insert_at(&mut self, slot: usize, sym: Sym) -> Result<(), AllocError> {
        let key = (sym.hash_value(), sym.len());
        let bucket = self.buckets.entry(key).or_default();
        bucket
            .try_reserve(1)
            .map_err(|_| AllocError::new("symbol"))?;
        bucket.insert(slot, sym);
        self.count += 1;
        Ok(())
    }

    fn sorted(&self) -> Vec<Sym> {
        let mut all: Vec<Sym> = self.buckets.values().flatten().cloned().collect();
        all.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
        all
    }
}

#[inline]
fn bucket_len(text: &[u8]) -> u32 {
    // callers reject texts longer than SYM_LEN_MAX before inserting;
    // longer lookups simply land in a bucket that cannot exist
    u32::try_from(text.len()).unwrap_or(u32::MAX)
}

/// Interning authority for [`Sym`]s, optionally chained to a base pool.
pub struct SymPool {
    tree: RwLock<SymTree>,
    base: Option<Arc<SymPool>>,
}

impl Default for SymPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SymPool {
    /// Empty pool without a base.
    pub fn new() -> Self {
        SymPool {
            tree: RwLock::new(SymTree::default()),
            base: None,
        }
    }

    /// Empty pool that falls back to `base` for lookups.
    pub fn with_base(base: Arc<SymPool>) -> Self {
        SymPool {
            tree: RwLock::new(SymTree::default()),
            base: Some(base),
        }
    }

    pub fn base(&self) -> Option<&Arc<SymPool>> {
        self.base.as_ref()
    }

    /// Look `text` up in this pool and its base chain. Never inserts.
    pub fn find(&self, text: impl AsRef<[u8]>) -> Option<Sym> {
        let text = text.as_ref();
        self.find_hashed(sym_hash(text), text)
    }

    fn find_hashed(&self, hash: u32, text: &[u8]) -> Option<Sym> {
        let mut pool = Some(self);
        while let Some(p) = pool {
            if let Some(sym) = p.find_local(hash, text) {
                return Some(sym);
            }
            pool = p.base.as_deref();
        }
        None
    }

    fn find_local(&self, hash: u32, text: &[u8]) -> Option<Sym> {
        self.tree.read().locate(hash, text).ok().cloned()
    }

    /// Intern `text`, searching the base chain first.
    ///
    /// On a miss the record is added to this pool, never to a base.
    pub fn get(&self, text: impl AsRef<[u8]>) -> Result<Sym, SymError> {
        let text = text.as_ref();
        let hash = sym_hash(text);
        if let Some(sym) = self.find_hashed(hash, text) {
            return Ok(sym);
        }
        self.insert(hash, text, 0)
    }

    /// Intern `text` into this pool without consulting the base chain.
    ///
    /// For callers that know the string is pool-local and likely new.
    pub fn add(&self, text: impl AsRef<[u8]>) -> Result<Sym, SymError> {
        let text = text.as_ref();
        let hash = sym_hash(text);
        if let Some(sym) = self.find_local(hash, text) {
            return Ok(sym);
        }
        self.insert(hash, text, 0)
    }

    /// Intern `text` into this pool with `flags` in the header.
    ///
    /// Flags are fixed at creation: if `text` is already in this pool the
    /// existing record is returned unchanged.
    pub fn add_flagged(&self, text: impl AsRef<[u8]>, flags: u8) -> Result<Sym, SymError> {
        debug_assert!(flags <= SYM_FLAGS_MAX, "sym flags {flags} out of range");
        let text = text.as_ref();
        let hash = sym_hash(text);
        self.insert(hash, text, flags & SYM_FLAGS_MAX)
    }

    fn insert(&self, hash: u32, text: &[u8], flags: u8) -> Result<Sym, SymError> {
        let len = u32::try_from(text.len())
            .ok()
            .filter(|&n| n <= SYM_LEN_MAX)
            .ok_or(SymError::TooLong { len: text.len() })?;

        // Build the record before taking the write lock.
        let mut owned = Vec::new();
        owned
            .try_reserve_exact(text.len())
            .map_err(AllocError::on("symbol text"))?;
        owned.extend_from_slice(text);
        let sym = Sym(Arc::new(SymRecord {
            hash,
            len_flags: len | (u32::from(flags) << SYM_LEN_BITS),
            text: owned.into_boxed_slice(),
        }));

        let mut tree = self.tree.write();
        // Another writer may have inserted the same key since our read.
        match tree.locate(hash, text) {
            Ok(existing) => Ok(existing.clone()),
            Err(slot) => {
                tree.insert_at(slot, sym.clone())?;
                trace!(sym = %sym, flags, "interned");
                Ok(sym)
            }
        }
    }

    /// Number of records held by this pool, not counting bases.
    pub fn len(&self) -> usize {
        self.tree.read().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// This pool's records sorted by text.
    pub fn local_syms(&self) -> Vec<Sym> {
        self.tree.read().sorted()
    }

    /// Printable listing, e.g. `{"a", "b"}, [base]: {"c"}`.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        let mut pool = Some(self);
        let mut first = true;
        while let Some(p) = pool {
            if !first {
                out.push_str(", [base]: ");
            }
            first = false;
            out.push('{');
            for (i, sym) in p.local_syms().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&format!("{:?}", sym.as_str()));
            }
            out.push('}');
            pool = p.base.as_deref();
        }
        out
    }
}

impl fmt::Debug for SymPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymPool")
            .field("len", &self.len())
            .field("has_base", &self.base.is_some())
            .finish()
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Sym;
    crate::static_assert_size!(Sym, 8);
}

#[cfg(test)]
mod tests;
