use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use num_traits::FromPrimitive;
use num_traits::SaturatingAdd;
use num_traits::sign::Unsigned;
use smallvec::SmallVec;
use thiserror::Error;

pub trait Action: Copy + Clone + Debug + Display + PartialEq + Eq {}
pub trait State: Copy + Clone + Debug + Display + PartialEq + Eq + Hash {}
pub trait Cost:
    Copy
    + Clone
    + Debug
    + std::fmt::Display
    + PartialEq
    + Eq
    + PartialOrd
    + Ord
    + SaturatingAdd
    + Unsigned
    + FromPrimitive
    + num_traits::bounds::UpperBounded
    + std::ops::Add
    + std::ops::AddAssign
{
    fn valid(&self) -> bool {
        *self != Self::max_value()
    }

    /// Converts a counter into a cost, saturating on overflow.
    fn saturating_from_usize(n: usize) -> Self {
        Self::from_usize(n).unwrap_or_else(Self::max_value)
    }
}

/// Successors of a state. A 2D grid never has more than 4.
pub type Neighbours<St, A> = SmallVec<[(St, A); 4]>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpaceError<St: State> {
    #[error("State {state} is outside of the space ({rows}x{cols})")]
    OutOfBounds { state: St, rows: usize, cols: usize },
}

/// A path through a space.
///
/// `states[i]` is the state reached by applying `actions[i]`, so `start` is
/// never part of `states` and `end` is its last element (or `start` for
/// empty paths).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    pub start: Option<S>,
    pub end: Option<S>,
    pub cost: C,
    pub actions: Vec<A>,
    pub states: Vec<S>,
}

impl<S, A, C> Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: S) -> Self {
        Self {
            start: Some(start),
            end: Some(start),
            cost: C::zero(),
            actions: vec![],
            states: vec![],
        }
    }

    #[inline(always)]
    pub fn empty() -> Self {
        Self {
            start: None,
            end: None,
            cost: C::zero(),
            actions: vec![],
            states: vec![],
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// The cells visited after leaving `start`, in order.
    #[inline(always)]
    pub fn cells(&self) -> &[S] {
        &self.states
    }

    /// Runs sanity checks
    #[inline(always)]
    pub fn seems_valid(&self) -> bool {
        self.start.is_some() == self.end.is_some()
            && self.actions.len() == self.states.len()
            && self.cost.valid()
    }

    #[inline(always)]
    pub fn append(&mut self, step: (S, A), c: C) {
        let (s, a) = step;
        self.actions.push(a);
        self.states.push(s);
        self.end = Some(s);
        self.cost = self.cost.saturating_add(&c);
    }
}

impl<S, A, C> std::fmt::Display for Path<S, A, C>
where
    S: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => {
                write!(f, "Path({}, {start}:", self.cost)?;
                for a in self.actions.iter().take(20) {
                    write!(f, "{a}")?;
                }
                if self.actions.len() > 20 {
                    write!(f, "…")?;
                }
                write!(f, ":{end})")
            }
            (None, None) => write!(f, "Path()"),
            _ => unreachable!("Path::start and Path::end should both be Some or None"),
        }
    }
}

pub trait Space<St, A, C>: std::fmt::Debug
where
    St: State,
    A: Action,
    C: Cost,
{
    /// Applies an action, yielding the successor only if it's a legal move.
    fn apply(&self, s: &St, a: &A) -> Option<St>;

    fn cost(&self, _s: &St, _a: &A) -> C {
        C::one()
    }

    /// Expands a State.
    ///
    /// Successors come out in a fixed order, which downstream tie-breaking
    /// depends on.
    fn neighbours(&self, s: &St) -> Result<Neighbours<St, A>, SpaceError<St>>;

    /// Verify is a State is valid.
    fn valid(&self, s: &St) -> bool;

    /// Replays a path action by action.
    fn valid_path(&self, p: &Path<St, A, C>) -> bool {
        if !p.seems_valid() {
            return false;
        }
        let Some(start) = p.start else {
            // Empty paths are fine
            return *p == Path::<St, A, C>::empty();
        };
        if !self.valid(&start) {
            return false;
        }

        let mut state: St = start;
        for (a, expected) in p.actions.iter().zip(p.states.iter()) {
            match self.apply(&state, a) {
                Some(new_state) if new_state == *expected => state = new_state,
                _ => return false,
            }
        }
        p.end == Some(state)
    }
}
