//! Progress reporting for whoever displays a search.
//!
//! A search emits one `Report` per expansion and a final one with either the
//! solution or nothing. The shapes mirror what a maze display needs: cells to
//! paint and the highlight to paint them with.

use std::sync::mpsc::SyncSender;
use std::sync::mpsc::TrySendError;

use derive_more::Display;

use crate::space::State;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[display("explored")]
    Explored,
    #[display("solution")]
    Solution,
}

/// A single reporting event.
///
/// | Event       | `solution_cells` | `explored`  | `steps`    |
/// |-------------|------------------|-------------|------------|
/// | Expansion   | `[]`             | `[cell]`    | 0          |
/// | Solved      | path w/o goal    | `[]`        | expansions |
/// | No solution | `[]`             | `[]`        | 0          |
///
/// A solved maze whose goal is next to the start also has empty
/// `solution_cells`, but it's told apart by `steps > 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report<St: State> {
    pub solution_cells: Vec<St>,
    pub solution_highlight: Option<Highlight>,
    pub explored: Vec<St>,
    pub explored_highlight: Option<Highlight>,
    pub steps: usize,
}

impl<St: State> Report<St> {
    pub fn explored(s: St) -> Self {
        Self {
            solution_cells: vec![],
            solution_highlight: None,
            explored: vec![s],
            explored_highlight: Some(Highlight::Explored),
            steps: 0,
        }
    }

    pub fn solved(solution_cells: Vec<St>, steps: usize) -> Self {
        debug_assert!(steps > 0);
        Self {
            solution_cells,
            solution_highlight: Some(Highlight::Solution),
            explored: vec![],
            explored_highlight: None,
            steps,
        }
    }

    pub fn no_solution() -> Self {
        Self {
            solution_cells: vec![],
            solution_highlight: None,
            explored: vec![],
            explored_highlight: None,
            steps: 0,
        }
    }

    /// Both cell lists empty means there's no solution, never an empty one.
    pub fn is_no_solution(&self) -> bool {
        self.solution_cells.is_empty() && self.explored.is_empty() && self.steps == 0
    }

    pub fn is_solution(&self) -> bool {
        self.steps > 0
    }
}

/// Receives reports synchronously from within the search loop.
pub trait Reporter<St: State> {
    fn report(&mut self, r: Report<St>);
}

impl<St, F> Reporter<St> for F
where
    St: State,
    F: FnMut(Report<St>),
{
    #[inline(always)]
    fn report(&mut self, r: Report<St>) {
        self(r)
    }
}

/// Keeps every report.
#[derive(Clone, Debug, Default)]
pub struct Recorder<St: State> {
    pub reports: Vec<Report<St>>,
}

impl<St: State> Recorder<St> {
    pub fn new() -> Self {
        Self { reports: vec![] }
    }
}

impl<St: State> Reporter<St> for Recorder<St> {
    fn report(&mut self, r: Report<St>) {
        self.reports.push(r);
    }
}

/// Forwards reports to another thread over a bounded channel.
///
/// Sending blocks while the channel is full, so a slow consumer slows the
/// search down instead of piling up reports. Once the receiver hangs up
/// reports are dropped.
#[derive(Debug)]
pub struct ChannelReporter<St: State> {
    tx: SyncSender<Report<St>>,
    disconnected: bool,
}

impl<St: State> ChannelReporter<St> {
    pub fn new(tx: SyncSender<Report<St>>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }
}

impl<St: State> Reporter<St> for ChannelReporter<St> {
    fn report(&mut self, r: Report<St>) {
        if self.disconnected {
            return;
        }
        let r = match self.tx.try_send(r) {
            Ok(()) => return,
            Err(TrySendError::Full(r)) => r,
            Err(TrySendError::Disconnected(_)) => {
                log::debug!("Report receiver hung up, dropping further reports");
                self.disconnected = true;
                return;
            }
        };
        if self.tx.send(r).is_err() {
            log::debug!("Report receiver hung up, dropping further reports");
            self.disconnected = true;
        }
    }
}
