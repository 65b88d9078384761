use std::collections::VecDeque;

use crate::frontier::FrontierNode;
use crate::frontier::Strategy;
use crate::space::Cost;
use crate::space::State;

/// Expands the most recently added node first (LIFO).
#[derive(Copy, Clone, Debug, Default)]
pub struct DepthFirst;

impl<St, C> Strategy<St, C> for DepthFirst
where
    St: State,
    C: Cost,
{
    fn name(&self) -> &'static str {
        "Depth First search"
    }

    #[inline(always)]
    fn remove_next(
        &self,
        open: &mut VecDeque<FrontierNode<St, C>>,
    ) -> Option<FrontierNode<St, C>> {
        open.pop_back()
    }
}
