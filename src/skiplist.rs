use std::fmt::{Debug, Display, Formatter};
use std::iter;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use crate::arena::{NodeArena, NodeId};
use crate::config::Config;
use crate::level::LevelGenerator;
use crate::types::{DeleteOutcome, Entry, InsertOutcome};

#[derive(Debug)]
struct Node<K, V> {
    entry: Entry<K, V>,
    forward: Box<[Option<NodeId>]>,
}

impl<K, V> Node<K, V> {
    /// Creates a node spanning levels `0..=level` with every link empty.
    fn new(key: K, value: V, level: usize) -> Self {
        Self {
            entry: Entry::new(key, value),
            forward: vec![None; level + 1].into_boxed_slice(),
        }
    }

    fn level(&self) -> usize {
        self.forward.len() - 1
    }

    fn key(&self) -> &K {
        &self.entry.key
    }

    fn value(&self) -> &V {
        &self.entry.value
    }

    fn next(&self, level: usize) -> Option<NodeId> {
        self.forward[level]
    }

    fn set_next(&mut self, level: usize, node: Option<NodeId>) {
        self.forward[level] = node
    }
}

/// A position during descent: the header or a live node.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Cursor {
    Head,
    At(NodeId),
}

pub(crate) struct InnerSkipList<K, V> {
    arena: NodeArena<Node<K, V>>,
    head: Box<[Option<NodeId>]>,
    level_gen: LevelGenerator,
    max_level: usize,
    level: usize,
    len: usize,
}

impl<K, V> InnerSkipList<K, V>
where
    K: Ord,
{
    pub(crate) fn new(max_level: usize, seed: Option<u64>) -> Self {
        Self {
            arena: NodeArena::new(),
            head: vec![None; max_level + 1].into_boxed_slice(),
            level_gen: LevelGenerator::new(max_level, seed),
            max_level,
            level: 0,
            len: 0,
        }
    }

    fn next(&self, at: Cursor, level: usize) -> Option<NodeId> {
        match at {
            Cursor::Head => self.head[level],
            Cursor::At(id) => self.arena[id].next(level),
        }
    }

    fn set_next(&mut self, at: Cursor, level: usize, node: Option<NodeId>) {
        match at {
            Cursor::Head => self.head[level] = node,
            Cursor::At(id) => self.arena[id].set_next(level, node),
        }
    }

    /// Walks from the top occupied level down to level 0, stopping on each
    /// level at the last node whose key is strictly less than `key`.
    ///
    /// Returns the per-level stopping points and the level-0 successor of
    /// the final one. Levels above the current level are left at the header.
    fn find_update(&self, key: &K) -> (Vec<Cursor>, Option<NodeId>) {
        let mut update = vec![Cursor::Head; self.max_level + 1];
        let mut current = Cursor::Head;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.arena[next].key() < key {
                    current = Cursor::At(next);
                } else {
                    break;
                }
            }
            update[level] = current;
        }
        (update, self.next(current, 0))
    }

    fn find(&self, key: &K) -> Option<NodeId> {
        let mut current = Cursor::Head;
        for level in (0..=self.level).rev() {
            while let Some(next) = self.next(current, level) {
                if self.arena[next].key() < key {
                    current = Cursor::At(next);
                } else {
                    break;
                }
            }
        }
        self.next(current, 0)
            .filter(|id| self.arena[*id].key() == key)
    }

    pub(crate) fn insert(&mut self, key: K, value: V) -> InsertOutcome {
        let (update, candidate) = self.find_update(&key);
        if let Some(id) = candidate {
            if self.arena[id].key() == &key {
                debug!(len = self.len, "key exists, insert skipped");
                return InsertOutcome::AlreadyExists;
            }
        }

        let new_level = self.level_gen.random_level();
        if new_level > self.level {
            self.level = new_level;
        }

        let id = self.arena.allocate(Node::new(key, value, new_level));
        for (level, prev) in update.iter().enumerate().take(new_level + 1) {
            let succ = self.next(*prev, level);
            self.arena[id].set_next(level, succ);
            self.set_next(*prev, level, Some(id));
        }

        self.len += 1;
        debug_assert_eq!(self.arena.len(), self.len);
        debug!(level = new_level, len = self.len, "inserted key");
        InsertOutcome::Inserted
    }

    pub(crate) fn delete(&mut self, key: &K) -> DeleteOutcome {
        let (update, candidate) = self.find_update(key);
        let target = match candidate {
            Some(id) if self.arena[id].key() == key => id,
            _ => {
                debug!(len = self.len, "key not found, delete skipped");
                return DeleteOutcome::NotFound;
            }
        };

        for level in 0..=self.level {
            if self.next(update[level], level) != Some(target) {
                break;
            }
            let succ = self.arena[target].next(level);
            self.set_next(update[level], level, succ);
        }

        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }

        let node = self.arena.free(target);
        self.len -= 1;
        debug_assert_eq!(self.arena.len(), self.len);
        debug!(level = node.level(), len = self.len, "deleted key");
        DeleteOutcome::Deleted
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        let found = self.find(key).map(|id| self.arena[id].value());
        debug!(found = found.is_some(), "query");
        found
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn level(&self) -> usize {
        self.level
    }

    pub(crate) fn max_level(&self) -> usize {
        self.max_level
    }

    /// Entries linked at `level`, in key order.
    pub(crate) fn chain(&self, level: usize) -> impl Iterator<Item = &Entry<K, V>> + '_ {
        iter::successors(self.head[level], move |id| self.arena[*id].next(level))
            .map(move |id| &self.arena[id].entry)
    }
}

/// A skip list keyed by `K`, safe to share between threads.
///
/// Writers (`insert`, `delete`, `load`) take an exclusive lock, readers take
/// a shared one, so a reader never observes a half-spliced node.
///
/// # Examples
/// ```
/// use skipstore::{DeleteOutcome, InsertOutcome, SkipList};
///
/// let list = SkipList::new(16).unwrap();
/// assert_eq!(list.insert(1, "a".to_string()), InsertOutcome::Inserted);
/// assert_eq!(list.insert(1, "c".to_string()), InsertOutcome::AlreadyExists);
/// assert_eq!(list.query(&1), Some("a".to_string()));
/// assert_eq!(list.delete(&7), DeleteOutcome::NotFound);
/// assert_eq!(list.size(), 1);
/// ```
pub struct SkipList<K, V> {
    pub(crate) inner: RwLock<InnerSkipList<K, V>>,
    store_path: PathBuf,
}

impl<K, V> SkipList<K, V>
where
    K: Ord,
{
    /// Builds an empty list whose nodes span at most `max_level + 1` levels.
    pub fn new(max_level: usize) -> crate::Result<Self> {
        Self::with_config(Config::with_max_level(max_level))
    }

    pub fn with_config(config: Config) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: RwLock::new(InnerSkipList::new(config.max_level, config.seed)),
            store_path: config.store_path,
        })
    }

    /// Adds `key` unless it is already present. An existing value is never
    /// overwritten.
    pub fn insert(&self, key: K, value: V) -> InsertOutcome {
        self.inner.write().insert(key, value)
    }

    pub fn delete(&self, key: &K) -> DeleteOutcome {
        self.inner.write().delete(key)
    }

    pub fn query(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().get(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn max_level(&self) -> usize {
        self.inner.read().max_level()
    }

    /// Highest level that currently links at least one node.
    pub fn current_level(&self) -> usize {
        self.inner.read().level()
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The level-0 chain as owned pairs, in ascending key order.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .chain(0)
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    /// Every level from 0 up to the current level, each in key order.
    pub fn levels(&self) -> Vec<Vec<(K, V)>>
    where
        K: Clone,
        V: Clone,
    {
        let inner = self.inner.read();
        (0..=inner.level())
            .map(|level| {
                inner
                    .chain(level)
                    .map(|e| (e.key.clone(), e.value.clone()))
                    .collect()
            })
            .collect()
    }

    /// Diagnostic rendering of every level; the layout is not stable.
    pub fn display(&self) -> String
    where
        K: Display,
        V: Display,
    {
        self.to_string()
    }
}

impl<K, V> Display for SkipList<K, V>
where
    K: Ord + Display,
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        for level in 0..=inner.level() {
            write!(f, "Level {}: ", level)?;
            for entry in inner.chain(level) {
                write!(f, "{}; ", entry)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K, V> Debug for SkipList<K, V>
where
    K: Ord + Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_map()
            .entries(inner.chain(0).map(|e| (&e.key, &e.value)))
            .finish()
    }
}
