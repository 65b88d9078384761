use std::fmt::Debug;

use nonmax::NonMaxUsize;

use crate::space::Action;
use crate::space::Cost;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, A, C>` within its `SearchTree`.
///
/// Children point to their parents, never the other way around, so the tree
/// can't form cycles and is dropped as a whole once the search is done.
///
/// Using `NonMaxUsize` keeps `Option<(SearchTreeIndex, A)>` as small as the
/// index itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self {
            // Vec lengths are bounded by isize::MAX, so this never hits usize::MAX.
            index: NonMaxUsize::new(index).expect("SearchTree index overflow"),
        }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

/// An immutable record of how a state was reached.
#[derive(Debug, Clone)]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// `None` only for the root.
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    pub(crate) heuristic: C,
    /// Number of expansions done when this node was generated.
    ///
    /// This is NOT the length of the path to this node.
    pub(crate) path_cost: C,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn new(s: St, parent: Option<(SearchTreeIndex, A)>, heuristic: C, path_cost: C) -> Self {
        Self {
            parent,
            state: s,
            heuristic,
            path_cost,
        }
    }

    pub fn new_root(s: St, heuristic: C) -> Self {
        Self::new(s, None, heuristic, C::zero())
    }

    pub fn state(&self) -> &St {
        &self.state
    }
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent.map(|(p, _a)| p)
    }
    /// The action that reached this node, if any.
    pub fn action(&self) -> Option<A> {
        self.parent.map(|(_p, a)| a)
    }
    pub fn heuristic(&self) -> C {
        self.heuristic
    }
    pub fn path_cost(&self) -> C {
        self.path_cost
    }
}

/// Arena owning every node generated during a single search run.
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        debug_assert!(
            node.parent.is_none_or(|(p, _a)| p.get() < self.nodes.len()),
            "Parents must be allocated before their children"
        );
        let index = SearchTreeIndex::new(self.nodes.len());
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Reconstructs the path from the root to `node_index`.
    ///
    /// The root state becomes `Path::start` and is not part of
    /// `Path::states`.
    #[must_use]
    pub fn path<Sp: Space<St, A, C>>(
        &self,
        space: &Sp,
        mut node_index: SearchTreeIndex,
    ) -> Path<St, A, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut steps: Vec<(St, A, C)> = vec![];
        while let Some((parent_index, a)) = self[node_index].parent {
            debug_assert!(parent_index.get() < node_index.get());
            let s = *self[node_index].state();
            let c: C = space.cost(self[parent_index].state(), &a);
            steps.push((s, a, c));
            node_index = parent_index;
        }

        let mut path = Path::<St, A, C>::new_from_start(*self[node_index].state());
        for (s, a, c) in steps.into_iter().rev() {
            path.append((s, a), c);
        }
        path
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, A, C> std::fmt::Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
