//! The set of generated but not yet expanded nodes.
//!
//! A `Frontier` only knows how to store nodes and answer membership queries.
//! Which node comes out next is decided by the `Strategy` it is built with,
//! so a single search driver covers depth-first, breadth-first, greedy
//! best-first and A*.

use std::collections::VecDeque;
use std::fmt::Debug;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::search::SearchTreeIndex;
use crate::space::Cost;
use crate::space::State;

/// A frontier entry.
///
/// Carries a copy of the ordering keys of the `SearchTreeNode` it points to,
/// so strategies can rank entries without looking into the search tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrontierNode<St, C>
where
    St: State,
    C: Cost,
{
    pub node: SearchTreeIndex,
    pub state: St,
    pub heuristic: C,
    pub path_cost: C,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("Tried to remove a node from an empty frontier")]
    Empty,
}

/// A removal policy over a `Frontier`.
pub trait Strategy<St, C>: Debug + Send + Sync
where
    St: State,
    C: Cost,
{
    /// The name this strategy is usually registered under.
    fn name(&self) -> &'static str;

    /// Removes the next node to expand.
    ///
    /// `open` is kept in insertion order (front is oldest), and ties must be
    /// resolved in favour of the earliest inserted node.
    fn remove_next(&self, open: &mut VecDeque<FrontierNode<St, C>>)
    -> Option<FrontierNode<St, C>>;
}

/// Removes the first node (in insertion order) minimising `key`.
#[inline(always)]
pub(crate) fn remove_first_min_by_key<St, C, K, F>(
    open: &mut VecDeque<FrontierNode<St, C>>,
    key: F,
) -> Option<FrontierNode<St, C>>
where
    St: State,
    C: Cost,
    K: Ord,
    F: Fn(&FrontierNode<St, C>) -> K,
{
    // NOTE: `min_by_key` keeps the first of equal elements.
    let (index, _) = open.iter().enumerate().min_by_key(|(_i, n)| key(n))?;
    open.remove(index)
}

pub struct Frontier<'s, St, C>
where
    St: State,
    C: Cost,
{
    open: VecDeque<FrontierNode<St, C>>,
    /// Number of copies of each state currently in `open`.
    ///
    /// The same state may be added twice before either copy is removed.
    members: FxHashMap<St, usize>,
    strategy: &'s dyn Strategy<St, C>,
}

impl<'s, St, C> Frontier<'s, St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new(strategy: &'s dyn Strategy<St, C>) -> Self {
        Self {
            open: VecDeque::with_capacity(256),
            members: FxHashMap::default(),
            strategy,
        }
    }

    /// Adds a node. Uniqueness is up to the caller (see `contains_state`).
    pub fn add(&mut self, node: FrontierNode<St, C>) {
        *self.members.entry(node.state).or_insert(0) += 1;
        self.open.push_back(node);
        self.verify();
    }

    #[inline(always)]
    #[must_use]
    pub fn contains_state(&self, s: &St) -> bool {
        self.members.contains_key(s)
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.open.capacity()
    }

    #[inline(always)]
    pub fn strategy(&self) -> &'s dyn Strategy<St, C> {
        self.strategy
    }

    /// Removes the next node as chosen by the strategy.
    ///
    /// Removing from an empty frontier is a bug in the caller and is reported
    /// as such.
    pub fn remove(&mut self) -> Result<FrontierNode<St, C>, FrontierError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FrontierRemove");

        let node = self
            .strategy
            .remove_next(&mut self.open)
            .ok_or(FrontierError::Empty)?;

        if let Some(copies) = self.members.get_mut(&node.state) {
            *copies -= 1;
            if *copies == 0 {
                self.members.remove(&node.state);
            }
        }
        self.verify();
        Ok(node)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    fn verify(&self) {
        // All good... (hopefully)
    }
    #[inline(always)]
    #[cfg(feature = "verify")]
    fn verify(&self) {
        let total: usize = self.members.values().sum();
        debug_assert_eq!(total, self.open.len(), "Frontier membership is out of sync");
        for n in &self.open {
            debug_assert!(
                self.members.get(&n.state).is_some_and(|&c| c > 0),
                "{} is in the frontier but not in its membership map",
                n.state
            );
        }
    }
}

impl<St, C> std::fmt::Debug for Frontier<'_, St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Frontier{{{:?}, ({} nodes)}}",
            self.strategy.name(),
            self.len()
        )
    }
}
