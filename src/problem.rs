use crate::space::Action;
use crate::space::Cost;
use crate::space::Space;
use crate::space::SpaceError;
use crate::space::State;

/// A single-start, single-goal search problem over a `Space`.
///
/// Problems are read-only once built, so a single instance can back any
/// number of searches.
pub trait Problem<Sp, St, A, C>: std::fmt::Debug
where
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    fn space(&self) -> &Sp;
    fn start(&self) -> St;
    fn goal(&self) -> St;

    fn is_goal(&self, s: &St) -> bool {
        *s == self.goal()
    }

    /// Estimated distance from `s` to the goal.
    ///
    /// Asking about a state outside of the space is a contract violation and
    /// fails instead of clamping.
    fn h(&self, s: &St) -> Result<C, SpaceError<St>>;
}

/// A heuristic between two states, independent of any problem instance.
pub trait ObjectiveHeuristic<Sp, St, A, C>: std::fmt::Debug
where
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    fn h(_s: &St, _goal: &St) -> C {
        C::zero()
    }
}
