use std::collections::VecDeque;

use crate::frontier::FrontierNode;
use crate::frontier::Strategy;
use crate::frontier::remove_first_min_by_key;
use crate::space::Cost;
use crate::space::State;

/// The ranking value for A*, `f = heuristic + path_cost`.
///
/// NOTE: `path_cost` is the number of expansions done when the node was
/// generated, not the length of the path leading to it. Ranking on it keeps
/// the order of this search stable across versions, but it doesn't give the
/// usual A* optimality guarantee.
///
/// ```
/// use maze_search::algorithms::astar::AStarRank;
///
/// assert!(AStarRank::new(2u32, 0u32) < AStarRank::new(0u32, 3u32));
/// assert_eq!(AStarRank::new(2u32, 1u32), AStarRank::new(1u32, 2u32));
/// assert_eq!(AStarRank::new(u32::MAX, 1u32), AStarRank::new(u32::MAX, 0u32));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank<C: Cost> {
    f: C,
}

impl<C> AStarRank<C>
where
    C: Cost,
{
    pub fn new(path_cost: C, heuristic: C) -> Self {
        Self {
            f: path_cost.saturating_add(&heuristic),
        }
    }

    pub fn f(&self) -> C {
        self.f
    }
}

/// Expands the node with the lowest `AStarRank`.
///
/// Equal ranks are NOT tie-broken on the heuristic, the earliest inserted
/// node wins.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar;

impl<St, C> Strategy<St, C> for AStar
where
    St: State,
    C: Cost,
{
    fn name(&self) -> &'static str {
        "A* search"
    }

    #[inline(always)]
    fn remove_next(
        &self,
        open: &mut VecDeque<FrontierNode<St, C>>,
    ) -> Option<FrontierNode<St, C>> {
        remove_first_min_by_key(open, |n| AStarRank::new(n.path_cost, n.heuristic))
    }
}
