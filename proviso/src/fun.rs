//! Synthesized function values.
//!
//! A property that takes "an arbitrary pure function" receives a [`Fun`]: a
//! finite lookup table plus a default result. Unlike a closure it can be
//! printed in a failure report and shrunk.

use std::collections::HashMap;
use std::fmt;

use crate::arbitrary::Arbitrary;
use crate::context::GenContext;
use crate::hash::{ValueHash, combine};
use crate::shrink::Shrink;

/// A pure function from `A` (usually a tuple of arguments) to `R`.
///
/// Lookup returns the table entry whose key equals the argument, or the
/// default when there is none. Entries keep insertion order, which is also
/// the order they are rendered in.
#[derive(Clone, PartialEq)]
pub struct Fun<A, R> {
    default: R,
    entries: Vec<(A, R)>,
    // value hash -> positions in `entries`
    index: HashMap<u64, Vec<usize>>,
}

impl<A, R> Fun<A, R>
where
    A: ValueHash + PartialEq,
{
    /// An empty table: every argument maps to `default`
    pub fn new(default: R) -> Self {
        Self {
            default,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a function from a default and key/value pairs.
    ///
    /// Later pairs overwrite earlier pairs with an equal key.
    pub fn from_table(default: R, table: impl IntoIterator<Item = (A, R)>) -> Self {
        let mut fun = Self::new(default);
        for (key, value) in table {
            fun.insert(key, value);
        }
        fun
    }

    /// Map `key` to `value`, replacing any previous mapping of an equal key
    pub fn insert(&mut self, key: A, value: R) {
        if let Some(pos) = self.position(&key) {
            self.entries[pos].1 = value;
            return;
        }
        let hash = key.value_hash();
        self.index.entry(hash).or_default().push(self.entries.len());
        self.entries.push((key, value));
    }

    /// Apply the function
    pub fn call(&self, args: &A) -> &R {
        match self.position(args) {
            Some(pos) => &self.entries[pos].1,
            None => &self.default,
        }
    }

    pub fn default_value(&self) -> &R {
        &self.default
    }

    /// Table entries in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&A, &R)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &A) -> Option<usize> {
        self.index
            .get(&key.value_hash())?
            .iter()
            .copied()
            .find(|&pos| self.entries[pos].0 == *key)
    }
}

impl<A, R> Fun<A, R>
where
    A: ValueHash + PartialEq + Clone,
    R: Clone,
{
    fn without_entry(&self, skip: usize) -> Self {
        let table = self
            .entries
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != skip)
            .map(|(_, entry)| entry.clone());
        Self::from_table(self.default.clone(), table)
    }
}

/// `size` table entries, then the default.
///
/// Before each result is drawn the stream is reseeded from the key's value
/// hash combined with the stream's next output, so a result depends on the
/// key it belongs to and not only on its position in the stream.
impl<A, R> Arbitrary for Fun<A, R>
where
    A: Arbitrary + ValueHash + PartialEq,
    R: Arbitrary,
{
    fn arbitrary(ctx: &mut GenContext) -> Self {
        let mut table = Vec::with_capacity(ctx.size());
        for _ in 0..ctx.size() {
            let key = A::arbitrary(ctx);
            let next = ctx.next_u64();
            ctx.reseed(combine(key.value_hash(), next));
            let value = R::arbitrary(ctx);
            table.push((key, value));
        }
        Self::from_table(R::arbitrary(ctx), table)
    }
}

/// Drop one table entry at a time, then shrink the default.
impl<A, R> Shrink for Fun<A, R>
where
    A: ValueHash + PartialEq + Clone,
    R: Shrink + Clone,
{
    fn shrink(&self) -> Vec<Self> {
        let mut candidates: Vec<Self> = (0..self.entries.len())
            .map(|pos| self.without_entry(pos))
            .collect();
        for default in self.default.shrink() {
            let mut fun = self.clone();
            fun.default = default;
            candidates.push(fun);
        }
        candidates
    }
}

impl<A: fmt::Debug, R: fmt::Debug> fmt::Debug for Fun<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (key, value) in &self.entries {
            write!(f, "{:?} -> {:?}, ", key, value)?;
        }
        write!(f, "_ -> {:?}}}", self.default)
    }
}
