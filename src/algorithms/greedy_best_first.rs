use std::collections::VecDeque;

use crate::frontier::FrontierNode;
use crate::frontier::Strategy;
use crate::frontier::remove_first_min_by_key;
use crate::space::Cost;
use crate::space::State;

/// Expands the node that looks closest to the goal, ignoring how it got there.
#[derive(Copy, Clone, Debug, Default)]
pub struct GreedyBestFirst;

impl<St, C> Strategy<St, C> for GreedyBestFirst
where
    St: State,
    C: Cost,
{
    fn name(&self) -> &'static str {
        "Greedy Best search"
    }

    #[inline(always)]
    fn remove_next(
        &self,
        open: &mut VecDeque<FrontierNode<St, C>>,
    ) -> Option<FrontierNode<St, C>> {
        remove_first_min_by_key(open, |n| n.heuristic)
    }
}
