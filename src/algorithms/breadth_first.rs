use std::collections::VecDeque;

use crate::frontier::FrontierNode;
use crate::frontier::Strategy;
use crate::space::Cost;
use crate::space::State;

/// Expands the least recently added node first (FIFO).
///
/// On uniform-cost spaces the first path found to the goal has the fewest
/// possible actions.
#[derive(Copy, Clone, Debug, Default)]
pub struct BreadthFirst;

impl<St, C> Strategy<St, C> for BreadthFirst
where
    St: State,
    C: Cost,
{
    fn name(&self) -> &'static str {
        "Breadth First search"
    }

    #[inline(always)]
    fn remove_next(
        &self,
        open: &mut VecDeque<FrontierNode<St, C>>,
    ) -> Option<FrontierNode<St, C>> {
        open.pop_front()
    }
}
