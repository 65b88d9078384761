use derive_more::Display;
use thiserror::Error;

use crate::problem::ObjectiveHeuristic;
use crate::problem::Problem;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Neighbours;
use crate::space::Space;
use crate::space::SpaceError;
use crate::space::State;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

pub type Coord = u32;

/// A cell position as `(row, col)`, row 0 being the top of the maze.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Maze2DState {
    pub(crate) row: Coord,
    pub(crate) col: Coord,
}

impl Maze2DState {
    pub const fn new(row: Coord, col: Coord) -> Maze2DState {
        Maze2DState { row, col }
    }
    pub fn new_from_usize(row: usize, col: usize) -> Option<Maze2DState> {
        Some(Maze2DState {
            row: Coord::try_from(row).ok()?,
            col: Coord::try_from(col).ok()?,
        })
    }

    pub fn row(&self) -> Coord {
        self.row
    }
    pub fn col(&self) -> Coord {
        self.col
    }
}
impl State for Maze2DState {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Maze2DAction {
    #[display("N")]
    North, // row--
    #[display("W")]
    West, // col--
    #[display("S")]
    South, // row++
    #[display("E")]
    East, // col++
}
impl Action for Maze2DAction {}

impl Maze2DAction {
    /// Expansion order. Tie-breaking in every strategy depends on it.
    pub const ALL: [Maze2DAction; 4] = [
        Maze2DAction::North,
        Maze2DAction::West,
        Maze2DAction::South,
        Maze2DAction::East,
    ];
}

pub type Maze2DCost = u32;
impl Cost for Maze2DCost {}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Maze2DCell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DCellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Maze2DCell {
    type Error = Maze2DCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' | '░' => Ok(Maze2DCell::Empty),
            '*' | '#' | '█' => Ok(Maze2DCell::Wall),
            ch => Err(Maze2DCellParseError::InvalidCharacter(ch)),
        }
    }
}

/// The passability map of a maze.
#[derive(Clone, PartialEq, Eq)]
pub struct Maze2DSpace {
    pub(crate) map: Vec<Vec<Maze2DCell>>,
}

impl Maze2DSpace {
    pub fn new_empty_with_dimensions(rows: usize, cols: usize) -> Self {
        Self {
            map: vec![vec![Maze2DCell::Empty; cols]; rows],
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        match self.map.first() {
            Some(row) => (self.map.len(), row.len()),
            None => (0, 0),
        }
    }

    #[inline(always)]
    pub fn at(&self, state: &Maze2DState) -> Option<Maze2DCell> {
        self.map
            .get(state.row as usize)?
            .get(state.col as usize)
            .copied()
    }

    #[inline(always)]
    pub fn is_wall(&self, state: &Maze2DState) -> bool {
        self.at(state) == Some(Maze2DCell::Wall)
    }

    pub fn set(
        &mut self,
        state: &Maze2DState,
        cell: Maze2DCell,
    ) -> Result<(), SpaceError<Maze2DState>> {
        if !self.valid(state) {
            return Err(self.out_of_bounds(state));
        }
        self.map[state.row as usize][state.col as usize] = cell;
        Ok(())
    }

    fn out_of_bounds(&self, state: &Maze2DState) -> SpaceError<Maze2DState> {
        let (rows, cols) = self.dimensions();
        SpaceError::OutOfBounds {
            state: *state,
            rows,
            cols,
        }
    }
}

impl Space<Maze2DState, Maze2DAction, Maze2DCost> for Maze2DSpace {
    #[inline(always)]
    fn apply(&self, state: &Maze2DState, action: &Maze2DAction) -> Option<Maze2DState> {
        let Maze2DState { row, col } = *state;

        #[rustfmt::skip]
        let (row, col) = match action {
            Maze2DAction::North => (row.checked_sub(1)?, col                ),
            Maze2DAction::West  => (row,                 col.checked_sub(1)?),
            Maze2DAction::South => (row.checked_add(1)?, col                ),
            Maze2DAction::East  => (row,                 col.checked_add(1)?),
        };

        let s = Maze2DState { row, col };
        match self.at(&s) {
            Some(Maze2DCell::Empty) => Some(s),
            Some(Maze2DCell::Wall) | None => None,
        }
    }

    #[inline(always)]
    fn valid(&self, state: &Maze2DState) -> bool {
        self.at(state).is_some()
    }

    /// Gets the open cells next to a position, in `Maze2DAction::ALL` order.
    fn neighbours(
        &self,
        state: &Maze2DState,
    ) -> Result<Neighbours<Maze2DState, Maze2DAction>, SpaceError<Maze2DState>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        if !self.valid(state) {
            return Err(self.out_of_bounds(state));
        }

        Ok(Maze2DAction::ALL
            .iter()
            .filter_map(|a| self.apply(state, a).map(|s| (s, *a)))
            .collect())
    }
}

impl std::fmt::Display for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.dimensions();
        writeln!(f, "Maze2D({rows}x{cols}):")?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Maze2DSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Maze2D{:?}", self.dimensions())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DProblemError {
    #[error("Start {0} is outside of the maze")]
    StartOutOfBounds(Maze2DState),
    #[error("Goal {0} is outside of the maze")]
    GoalOutOfBounds(Maze2DState),
    #[error("Start {0} is a wall")]
    StartIsWall(Maze2DState),
    #[error("Goal {0} is a wall")]
    GoalIsWall(Maze2DState),
}

/// A maze with exactly one start and one goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze2DProblem {
    space: Maze2DSpace,
    start: Maze2DState,
    goal: Maze2DState,
}

impl Maze2DProblem {
    pub fn new(
        space: Maze2DSpace,
        start: Maze2DState,
        goal: Maze2DState,
    ) -> Result<Self, Maze2DProblemError> {
        match space.at(&start) {
            None => return Err(Maze2DProblemError::StartOutOfBounds(start)),
            Some(Maze2DCell::Wall) => return Err(Maze2DProblemError::StartIsWall(start)),
            Some(Maze2DCell::Empty) => {}
        }
        match space.at(&goal) {
            None => return Err(Maze2DProblemError::GoalOutOfBounds(goal)),
            Some(Maze2DCell::Wall) => return Err(Maze2DProblemError::GoalIsWall(goal)),
            Some(Maze2DCell::Empty) => {}
        }

        Ok(Self { space, start, goal })
    }
}

impl Problem<Maze2DSpace, Maze2DState, Maze2DAction, Maze2DCost> for Maze2DProblem {
    fn space(&self) -> &Maze2DSpace {
        &self.space
    }
    fn start(&self) -> Maze2DState {
        self.start
    }
    fn goal(&self) -> Maze2DState {
        self.goal
    }

    fn h(&self, s: &Maze2DState) -> Result<Maze2DCost, SpaceError<Maze2DState>> {
        if !self.space.valid(s) {
            return Err(self.space.out_of_bounds(s));
        }
        Ok(Maze2DHeuristicManhattanDistance::h(s, &self.goal))
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq)]
pub enum Maze2DProblemCell {
    Cell(Maze2DCell),
    #[display("A")]
    Start,
    #[display("B")]
    Goal,
    #[display("!")]
    StartAndGoal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Maze2DProblemCellParseError {
    #[error("Invalid cell {e}")]
    InvalidCell { e: Maze2DCellParseError },
}

impl std::convert::TryFrom<char> for Maze2DProblemCell {
    type Error = Maze2DProblemCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'A' => Ok(Maze2DProblemCell::Start),
            'B' => Ok(Maze2DProblemCell::Goal),
            '!' => Ok(Maze2DProblemCell::StartAndGoal),
            ch => {
                let cell = Maze2DCell::try_from(ch)
                    .map_err(|e| Maze2DProblemCellParseError::InvalidCell { e })?;
                Ok(Maze2DProblemCell::Cell(cell))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Maze2DProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({row},{col})")]
    InvalidCell {
        e: Maze2DProblemCellParseError,
        row: usize,
        col: usize,
    },
    #[error("Maze is too large ({rows}x{cols})")]
    TooLarge { rows: usize, cols: usize },
    #[error("No start ('A') found")]
    MissingStart,
    #[error("No goal ('B') found")]
    MissingGoal,
    #[error("Found a second start at {second}, the first one is at {first}")]
    DuplicateStart {
        first: Maze2DState,
        second: Maze2DState,
    },
    #[error("Found a second goal at {second}, the first one is at {first}")]
    DuplicateGoal {
        first: Maze2DState,
        second: Maze2DState,
    },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

fn place(
    slot: &mut Option<Maze2DState>,
    s: Maze2DState,
    duplicate: fn(Maze2DState, Maze2DState) -> Maze2DProblemParseError,
) -> Result<(), Maze2DProblemParseError> {
    match slot {
        Some(first) => Err(duplicate(*first, s)),
        None => {
            *slot = Some(s);
            Ok(())
        }
    }
}

impl std::convert::TryFrom<&str> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    /// Parses a text maze.
    ///
    /// `A` is the start, `B` the goal, `!` both, and `*` a wall. Rows shorter
    /// than the widest one are padded with open cells.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let rows = lines.len();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(Maze2DProblemParseError::EmptyInput);
        }
        if Maze2DState::new_from_usize(rows, cols).is_none() {
            return Err(Maze2DProblemParseError::TooLarge { rows, cols });
        }

        let mut space = Maze2DSpace::new_empty_with_dimensions(rows, cols);
        let mut start: Option<Maze2DState> = None;
        let mut goal: Option<Maze2DState> = None;

        for (row, line) in lines.iter().enumerate() {
            let mut width = 0usize;
            for (col, ch) in line.chars().enumerate() {
                width += 1;
                let cell = Maze2DProblemCell::try_from(ch)
                    .map_err(|e| Maze2DProblemParseError::InvalidCell { e, row, col })?;
                // Fits, as (rows, cols) did.
                let s = Maze2DState::new(row as Coord, col as Coord);

                space.map[row][col] = match cell {
                    Maze2DProblemCell::Start => {
                        place(&mut start, s, |first, second| {
                            Maze2DProblemParseError::DuplicateStart { first, second }
                        })?;
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Goal => {
                        place(&mut goal, s, |first, second| {
                            Maze2DProblemParseError::DuplicateGoal { first, second }
                        })?;
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::StartAndGoal => {
                        place(&mut start, s, |first, second| {
                            Maze2DProblemParseError::DuplicateStart { first, second }
                        })?;
                        place(&mut goal, s, |first, second| {
                            Maze2DProblemParseError::DuplicateGoal { first, second }
                        })?;
                        Maze2DCell::Empty
                    }
                    Maze2DProblemCell::Cell(c) => c,
                }
            }
            if width < cols {
                log::debug!("Padding row {row} with {} open cells", cols - width);
            }
        }

        let start = start.ok_or(Maze2DProblemParseError::MissingStart)?;
        let goal = goal.ok_or(Maze2DProblemParseError::MissingGoal)?;
        Ok(Maze2DProblem { space, start, goal })
    }
}

impl std::convert::TryFrom<&std::path::Path> for Maze2DProblem {
    type Error = Maze2DProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let text = std::fs::read_to_string(p).map_err(|e| Maze2DProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        log::debug!("Loaded {} ({} bytes)", p.display(), text.len());
        Maze2DProblem::try_from(text.as_str())
    }
}

impl std::fmt::Display for Maze2DProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.space.dimensions();

        writeln!(
            f,
            "Maze2DProblem({rows}x{cols}) (s:{}, g:{}):",
            self.start, self.goal
        )?;
        let map = &self.space.map;
        for (row, line) in map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (col, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let s = Maze2DState::new(row as Coord, col as Coord);

                match (s == self.start, s == self.goal) {
                    (true, true) => write!(f, "{}", Maze2DProblemCell::StartAndGoal)?,
                    (true, false) => write!(f, "{}", Maze2DProblemCell::Start)?,
                    (false, true) => write!(f, "{}", Maze2DProblemCell::Goal)?,
                    (false, false) => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[derive(Debug)]
pub struct Maze2DHeuristicManhattanDistance;

impl ObjectiveHeuristic<Maze2DSpace, Maze2DState, Maze2DAction, Maze2DCost>
    for Maze2DHeuristicManhattanDistance
{
    /// The distance of following straight lines
    ///
    /// ```
    /// use maze_search::problem::ObjectiveHeuristic;
    /// use maze_search::problems::maze_2d::Maze2DHeuristicManhattanDistance;
    /// use maze_search::problems::maze_2d::Maze2DState;
    ///
    /// let a = Maze2DState::new(0, 0);
    /// let b = Maze2DState::new(2, 3);
    /// assert_eq!(Maze2DHeuristicManhattanDistance::h(&a, &b), 5);
    /// assert_eq!(Maze2DHeuristicManhattanDistance::h(&b, &a), 5);
    /// assert_eq!(Maze2DHeuristicManhattanDistance::h(&b, &b), 0);
    /// ```
    #[inline(always)]
    fn h(a: &Maze2DState, b: &Maze2DState) -> Maze2DCost {
        a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
    }
}
