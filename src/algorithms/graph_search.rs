use std::marker::PhantomData;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::frontier::Frontier;
use crate::frontier::FrontierError;
use crate::frontier::FrontierNode;
use crate::frontier::Strategy;
use crate::problem::Problem;
use crate::report::Report;
use crate::report::Reporter;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Action;
use crate::space::Cost;
use crate::space::Path;
use crate::space::Space;
use crate::space::SpaceError;
use crate::space::State;

/// Contract violations found while searching.
///
/// Not finding a path is NOT an error, see `Outcome::NoSolution`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError<St: State> {
    #[error(transparent)]
    Space(#[from] SpaceError<St>),
    #[error(transparent)]
    Frontier(#[from] FrontierError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    /// From the start (excluded) to the goal (included).
    pub path: Path<St, A, C>,
    /// Every expanded state. The goal is removed but never expanded.
    pub explored: FxHashSet<St>,
    /// Number of nodes removed from the frontier, the goal included.
    pub steps_explored: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    NoSolution {
        /// The whole component reachable from the start.
        explored: FxHashSet<St>,
        steps_explored: usize,
    },
    Solved(Solution<St, A, C>),
}

impl<St, A, C> Outcome<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }
    pub fn solution(&self) -> Option<&Solution<St, A, C>> {
        match self {
            Outcome::Solved(s) => Some(s),
            Outcome::NoSolution { .. } => None,
        }
    }
    pub fn path(&self) -> Option<&Path<St, A, C>> {
        self.solution().map(|s| &s.path)
    }
    pub fn explored(&self) -> &FxHashSet<St> {
        match self {
            Outcome::Solved(s) => &s.explored,
            Outcome::NoSolution { explored, .. } => explored,
        }
    }
    pub fn steps_explored(&self) -> usize {
        match self {
            Outcome::Solved(s) => s.steps_explored,
            Outcome::NoSolution { steps_explored, .. } => *steps_explored,
        }
    }
}

/// What a single `GraphSearch::step` did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step<St: State> {
    /// Expanded a state, adding its unseen neighbours to the frontier.
    Expanded(St),
    /// Removed the goal. The search is over, and further steps keep
    /// returning the same node.
    Goal(SearchTreeIndex),
    /// Nothing left to expand. The search is over.
    Exhausted,
}

/// A single run of graph search over a problem.
///
/// The `Strategy` decides the order in which frontier nodes are expanded,
/// everything else is shared:
///
/// ```text
/// frontier.add(root(start))
/// loop:
///   if frontier.is_empty(): return NoSolution
///   n = frontier.remove(); steps += 1
///   if goal(n): return Solved(path(n))
///   explored.add(n); report(n)
///   for (s, a) in neighbours(n):
///     if s not in frontier and s not in explored:
///       frontier.add(Node(s, parent=n, a, h(s), path_cost=steps))
/// ```
///
/// Every run owns its search tree, frontier and explored set. The problem is
/// only read, so any number of runs may share it.
#[derive(Debug)]
pub struct GraphSearch<'p, 's, P, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// All the Search Nodes generated in this run.
    search_tree: SearchTree<St, A, C>,
    frontier: Frontier<'s, St, C>,
    /// The "Closed Set".
    explored: FxHashSet<St>,
    /// `explored`, in expansion order.
    explored_order: Vec<St>,
    /// Nodes removed from the frontier so far.
    steps: usize,
    /// Set once the goal is removed from the frontier.
    goal: Option<SearchTreeIndex>,

    problem: &'p P,

    _phantom_space: PhantomData<Sp>,
}

impl<'p, 's, P, Sp, St, A, C> GraphSearch<'p, 's, P, Sp, St, A, C>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
{
    /// Seeds a new search with the start state.
    ///
    /// Fails if the start is not part of the space.
    pub fn new(
        problem: &'p P,
        strategy: &'s dyn Strategy<St, C>,
    ) -> Result<Self, SearchError<St>> {
        let mut search = Self {
            search_tree: SearchTree::new(),
            frontier: Frontier::new(strategy),
            explored: FxHashSet::default(),
            explored_order: vec![],
            steps: 0,
            goal: None,

            problem,

            _phantom_space: PhantomData,
        };

        let start = problem.start();
        let h: C = problem.h(&start)?;
        let node = search.search_tree.push(SearchTreeNode::new_root(start, h));
        search.frontier.add(FrontierNode {
            node,
            state: start,
            heuristic: h,
            path_cost: C::zero(),
        });

        Ok(search)
    }

    /// Removes one node from the frontier and expands it unless it's a goal.
    ///
    /// Expansions are reported as they happen, but neither the solution nor
    /// its absence is, see `run`.
    pub fn step<R: Reporter<St>>(
        &mut self,
        reporter: &mut R,
    ) -> Result<Step<St>, SearchError<St>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("NodeExpansion");

        if let Some(goal) = self.goal {
            return Ok(Step::Goal(goal));
        }
        if self.frontier.is_empty() {
            return Ok(Step::Exhausted);
        }
        let n = self.frontier.remove()?;
        self.steps += 1;

        if self.problem.is_goal(&n.state) {
            #[cfg(feature = "coz_profile")]
            coz::progress!("GoalFound");
            self.goal = Some(n.node);
            return Ok(Step::Goal(n.node));
        }

        if self.explored.insert(n.state) {
            self.explored_order.push(n.state);
        }
        log::trace!("#{} expanding {}", self.steps, n.state);
        reporter.report(Report::explored(n.state));

        let path_cost = C::saturating_from_usize(self.steps);
        for (s, a) in self.problem.space().neighbours(&n.state)? {
            if self.frontier.contains_state(&s) || self.explored.contains(&s) {
                continue;
            }
            let heuristic: C = self.problem.h(&s)?;
            let node = self.search_tree.push(SearchTreeNode::new(
                s,
                Some((n.node, a)),
                heuristic,
                path_cost,
            ));
            self.frontier.add(FrontierNode {
                node,
                state: s,
                heuristic,
                path_cost,
            });
        }

        Ok(Step::Expanded(n.state))
    }

    /// Runs the search to completion.
    ///
    /// The last report is either the solution (goal excluded, as the start
    /// already is) or the no-solution report. The search is left as it ended,
    /// so its stats are still available.
    pub fn run<R: Reporter<St>>(
        &mut self,
        reporter: &mut R,
    ) -> Result<Outcome<St, A, C>, SearchError<St>> {
        log::debug!(
            "Searching {:?} from {} to {} using {}",
            self.problem,
            self.problem.start(),
            self.problem.goal(),
            self.frontier.strategy().name(),
        );

        loop {
            match self.step(reporter)? {
                Step::Expanded(_) => {}
                Step::Goal(node_index) => {
                    let path = self.path(node_index);
                    debug_assert!(path.seems_valid());

                    let mut solution_cells = path.cells().to_vec();
                    solution_cells.pop();
                    reporter.report(Report::solved(solution_cells, self.steps));

                    log::debug!(
                        "Solved after {} steps, {} explored: {path}",
                        self.steps,
                        self.explored.len()
                    );
                    return Ok(Outcome::Solved(Solution {
                        path,
                        explored: self.explored.clone(),
                        steps_explored: self.steps,
                    }));
                }
                Step::Exhausted => {
                    reporter.report(Report::no_solution());

                    log::debug!(
                        "No solution after {} steps, {} explored",
                        self.steps,
                        self.explored.len()
                    );
                    return Ok(Outcome::NoSolution {
                        explored: self.explored.clone(),
                        steps_explored: self.steps,
                    });
                }
            }
        }
    }

    /// The path from the start to a node of this search.
    #[must_use]
    pub fn path(&self, node_index: SearchTreeIndex) -> Path<St, A, C> {
        self.search_tree.path(self.problem.space(), node_index)
    }

    pub fn explored(&self) -> &FxHashSet<St> {
        &self.explored
    }
    pub fn explored_order(&self) -> &[St] {
        &self.explored_order
    }
    pub fn steps_explored(&self) -> usize {
        self.steps
    }
    pub fn frontier(&self) -> &Frontier<'s, St, C> {
        &self.frontier
    }
    /// The goal node, once it was removed from the frontier.
    pub fn goal(&self) -> Option<SearchTreeIndex> {
        self.goal
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "GraphSearch Stats ({}):", self.frontier.strategy().name())?;
        let s = size_of::<SearchTreeNode<St, A, C>>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;

        let s = size_of::<FrontierNode<St, C>>();
        let l = self.frontier.len();
        let c = self.frontier.capacity();
        writeln!(
            out,
            "  - |Frontier|: {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Frontier|*: {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;

        let s = size_of::<St>();
        let l = self.explored.len();
        writeln!(
            out,
            "  - |Explored|: {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - Removed nodes: {}",
            self.steps.separate_with_commas()
        )?;

        Ok(())
    }
    pub fn print_stats(&self) -> std::io::Result<()> {
        self.write_stats(std::io::stdout().lock())
    }
}

/// Searches `problem` with `strategy`, reporting progress to `reporter`.
pub fn search<P, Sp, St, A, C, R>(
    problem: &P,
    strategy: &dyn Strategy<St, C>,
    reporter: &mut R,
) -> Result<Outcome<St, A, C>, SearchError<St>>
where
    P: Problem<Sp, St, A, C>,
    Sp: Space<St, A, C>,
    St: State,
    A: Action,
    C: Cost,
    R: Reporter<St>,
{
    GraphSearch::new(problem, strategy)?.run(reporter)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use indoc::indoc;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashMap;

    use super::*;

    use crate::algorithms::astar::AStar;
    use crate::algorithms::breadth_first::BreadthFirst;
    use crate::algorithms::depth_first::DepthFirst;
    use crate::algorithms::greedy_best_first::GreedyBestFirst;
    use crate::problems::maze_2d::Maze2DAction;
    use crate::problems::maze_2d::Maze2DCell;
    use crate::problems::maze_2d::Maze2DCost;
    use crate::problems::maze_2d::Maze2DProblem;
    use crate::problems::maze_2d::Maze2DSpace;
    use crate::problems::maze_2d::Maze2DState;
    use crate::report::Recorder;

    type M2DOutcome = Outcome<Maze2DState, Maze2DAction, Maze2DCost>;
    type M2DStrategy = dyn Strategy<Maze2DState, Maze2DCost>;

    const STRATEGIES: [&M2DStrategy; 4] = [&DepthFirst, &BreadthFirst, &GreedyBestFirst, &AStar];

    fn s(row: u32, col: u32) -> Maze2DState {
        Maze2DState::new(row, col)
    }

    fn solve(
        problem: &Maze2DProblem,
        strategy: &M2DStrategy,
    ) -> (M2DOutcome, Vec<Report<Maze2DState>>) {
        let mut recorder = Recorder::new();
        let outcome = search(problem, strategy, &mut recorder).unwrap();
        (outcome, recorder.reports)
    }

    /// Distances from the start, computed independently.
    fn distances(problem: &Maze2DProblem) -> FxHashMap<Maze2DState, usize> {
        let mut dist = FxHashMap::default();
        let mut queue = VecDeque::new();
        dist.insert(problem.start(), 0usize);
        queue.push_back(problem.start());
        while let Some(c) = queue.pop_front() {
            let d = dist[&c];
            for (n, _a) in problem.space().neighbours(&c).unwrap() {
                if !dist.contains_key(&n) {
                    dist.insert(n, d + 1);
                    queue.push_back(n);
                }
            }
        }
        dist
    }

    #[test]
    fn ragged_scenario() {
        let problem = Maze2DProblem::try_from(indoc! {"
            A**
            .*.
            ...B
        "})
        .unwrap();
        let expected_cells = vec![s(1, 0), s(2, 0), s(2, 1), s(2, 2), s(2, 3)];

        let cases: [(&M2DStrategy, usize); 4] = [
            (&BreadthFirst, 7),
            (&DepthFirst, 6),
            (&GreedyBestFirst, 6),
            (&AStar, 6),
        ];
        for (strategy, steps) in cases {
            let (outcome, reports) = solve(&problem, strategy);
            let solution = outcome.solution().unwrap();

            assert_eq!(solution.path.len(), 5, "{}", strategy.name());
            assert_eq!(solution.path.cells(), expected_cells.as_slice());
            assert_eq!(
                solution.path.actions,
                vec![
                    Maze2DAction::South,
                    Maze2DAction::South,
                    Maze2DAction::East,
                    Maze2DAction::East,
                    Maze2DAction::East,
                ]
            );
            assert_eq!(solution.steps_explored, steps, "{}", strategy.name());
            assert_eq!(solution.explored.len(), steps - 1);
            assert!(problem.space().valid_path(&solution.path));

            // One report per expansion, then the solution without the goal.
            assert_eq!(reports.len(), steps);
            let last = reports.last().unwrap();
            assert_eq!(last, &Report::solved(expected_cells[..4].to_vec(), steps));
        }
    }

    #[test]
    fn start_is_goal() {
        let problem = Maze2DProblem::try_from("!").unwrap();
        for strategy in STRATEGIES {
            let (outcome, reports) = solve(&problem, strategy);
            let solution = outcome.solution().unwrap();
            assert!(solution.path.is_empty());
            assert_eq!(solution.path.start, Some(s(0, 0)));
            assert_eq!(solution.path.end, Some(s(0, 0)));
            assert_eq!(solution.steps_explored, 1);
            assert!(solution.explored.is_empty());

            assert_eq!(reports, vec![Report::solved(vec![], 1)]);
            assert!(!reports[0].is_no_solution());
        }
    }

    #[test]
    fn walled_off_goal() {
        let problem = Maze2DProblem::try_from(indoc! {"
            A.*..
            ..*.B
            ***..
        "})
        .unwrap();
        let reachable: FxHashSet<Maze2DState> = [s(0, 0), s(0, 1), s(1, 0), s(1, 1)]
            .into_iter()
            .collect();

        for strategy in STRATEGIES {
            let (outcome, reports) = solve(&problem, strategy);
            assert!(!outcome.is_solved());
            assert_eq!(outcome.explored(), &reachable, "{}", strategy.name());
            assert_eq!(outcome.steps_explored(), 4);

            assert_eq!(reports.len(), 5);
            assert!(reports[..4].iter().all(|r| r.explored.len() == 1 && r.steps == 0));
            assert!(reports[4].is_no_solution());
        }
    }

    #[test]
    fn tie_breaking_on_an_open_square() {
        let problem = Maze2DProblem::try_from(indoc! {"
            A.
            .B
        "})
        .unwrap();
        use Maze2DAction::East;
        use Maze2DAction::South;

        let cases: [(&M2DStrategy, Vec<Maze2DAction>, Vec<Maze2DState>, usize); 4] = [
            (
                &DepthFirst,
                vec![East, South],
                vec![s(0, 0), s(0, 1)],
                3,
            ),
            (
                &BreadthFirst,
                vec![South, East],
                vec![s(0, 0), s(1, 0), s(0, 1)],
                4,
            ),
            (
                &GreedyBestFirst,
                vec![South, East],
                vec![s(0, 0), s(1, 0)],
                3,
            ),
            // (0,1) was added before (1,1) and has the same f.
            (
                &AStar,
                vec![South, East],
                vec![s(0, 0), s(1, 0), s(0, 1)],
                4,
            ),
        ];
        for (strategy, actions, order, steps) in cases {
            let mut search = GraphSearch::new(&problem, strategy).unwrap();
            let mut recorder = Recorder::new();
            let goal = loop {
                match search.step(&mut recorder).unwrap() {
                    Step::Expanded(_) => {}
                    Step::Goal(node) => break node,
                    Step::Exhausted => panic!("{} found no path", strategy.name()),
                }
            };

            assert_eq!(search.path(goal).actions, actions, "{}", strategy.name());
            assert_eq!(search.explored_order(), order.as_slice(), "{}", strategy.name());
            assert_eq!(search.steps_explored(), steps, "{}", strategy.name());
            assert_eq!(recorder.reports.len(), order.len());
            for (r, cell) in recorder.reports.iter().zip(order.iter()) {
                assert_eq!(r, &Report::explored(*cell));
            }
        }
    }

    #[test]
    fn astar_ties_favour_older_nodes() {
        let problem = Maze2DProblem::try_from(indoc! {"
            ...
            .A.
            ..B
        "})
        .unwrap();

        // South and East of A tie, and (1,2) is older than the goal
        // generated when expanding (2,1), so it goes first.
        let mut search = GraphSearch::new(&problem, &AStar).unwrap();
        let mut ignore = |_r: Report<Maze2DState>| {};
        let goal = loop {
            match search.step(&mut ignore).unwrap() {
                Step::Expanded(_) => {}
                Step::Goal(node) => break node,
                Step::Exhausted => panic!("A* found no path"),
            }
        };
        assert_eq!(
            search.explored_order(),
            &[s(1, 1), s(2, 1), s(1, 2)]
        );
        assert_eq!(search.steps_explored(), 4);
        assert_eq!(
            search.path(goal).actions,
            vec![Maze2DAction::South, Maze2DAction::East]
        );
    }

    #[test]
    fn steps_keep_going_after_the_end() {
        let problem = Maze2DProblem::try_from("A*B").unwrap();
        let mut search = GraphSearch::new(&problem, &BreadthFirst).unwrap();
        let mut ignore = |_r: Report<Maze2DState>| {};
        assert_eq!(search.step(&mut ignore), Ok(Step::Expanded(s(0, 0))));
        assert_eq!(search.step(&mut ignore), Ok(Step::Exhausted));
        assert_eq!(search.step(&mut ignore), Ok(Step::Exhausted));
        assert_eq!(search.steps_explored(), 1);
    }

    #[test]
    fn run_after_stepping_onto_the_goal() {
        let problem = Maze2DProblem::try_from("A.B.").unwrap();
        let mut search = GraphSearch::new(&problem, &BreadthFirst).unwrap();
        let mut recorder = Recorder::new();

        assert_eq!(search.step(&mut recorder), Ok(Step::Expanded(s(0, 0))));
        assert_eq!(search.step(&mut recorder), Ok(Step::Expanded(s(0, 1))));
        let goal = match search.step(&mut recorder).unwrap() {
            Step::Goal(node) => node,
            step => panic!("Expected the goal, got {step:?}"),
        };
        assert_eq!(search.goal(), Some(goal));

        // The search is over, the leftover frontier is never expanded.
        assert_eq!(search.step(&mut recorder), Ok(Step::Goal(goal)));
        assert_eq!(search.step(&mut recorder), Ok(Step::Goal(goal)));
        assert_eq!(search.steps_explored(), 3);

        let outcome = search.run(&mut recorder).unwrap();
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.path.cells(), &[s(0, 1), s(0, 2)]);
        assert_eq!(solution.steps_explored, 3);
        assert_eq!(
            recorder.reports,
            vec![
                Report::explored(s(0, 0)),
                Report::explored(s(0, 1)),
                Report::solved(vec![s(0, 1)], 3),
            ]
        );
    }

    #[test]
    fn out_of_bounds_start_is_reported() {
        #[derive(Debug)]
        struct Broken(Maze2DProblem);
        impl Problem<Maze2DSpace, Maze2DState, Maze2DAction, Maze2DCost> for Broken {
            fn space(&self) -> &Maze2DSpace {
                self.0.space()
            }
            fn start(&self) -> Maze2DState {
                s(5, 5)
            }
            fn goal(&self) -> Maze2DState {
                self.0.goal()
            }
            fn h(&self, st: &Maze2DState) -> Result<Maze2DCost, SpaceError<Maze2DState>> {
                self.0.h(st)
            }
        }

        let broken = Broken(Maze2DProblem::try_from("AB").unwrap());
        let err = GraphSearch::new(&broken, &AStar).unwrap_err();
        assert_eq!(
            err,
            SearchError::Space(SpaceError::OutOfBounds {
                state: s(5, 5),
                rows: 1,
                cols: 2
            })
        );
    }

    #[test]
    fn stats() {
        let problem = Maze2DProblem::try_from("A.B").unwrap();
        let mut search = GraphSearch::new(&problem, &DepthFirst).unwrap();
        search.step(&mut |_r: Report<Maze2DState>| {}).unwrap();

        let mut out = vec![];
        search.write_stats(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("GraphSearch Stats (Depth First search):"));
        assert!(out.contains("Removed nodes: 1"));

        // Running to the end keeps the search around.
        let outcome = search.run(&mut |_r: Report<Maze2DState>| {}).unwrap();
        assert_eq!(outcome.steps_explored(), 3);
        assert_eq!(search.steps_explored(), 3);
        assert_eq!(search.explored(), outcome.explored());
    }

    fn random_problem(rng: &mut ChaCha8Rng) -> Maze2DProblem {
        let rows = rng.random_range(1..=12usize);
        let cols = rng.random_range(1..=12usize);
        let mut space = Maze2DSpace::new_empty_with_dimensions(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if rng.random_bool(0.35) {
                    let cell = Maze2DState::new_from_usize(row, col).unwrap();
                    space.set(&cell, Maze2DCell::Wall).unwrap();
                }
            }
        }

        let random_cell = |rng: &mut ChaCha8Rng| {
            Maze2DState::new_from_usize(rng.random_range(0..rows), rng.random_range(0..cols))
                .unwrap()
        };
        let start = random_cell(rng);
        let goal = random_cell(rng);
        space.set(&start, Maze2DCell::Empty).unwrap();
        space.set(&goal, Maze2DCell::Empty).unwrap();

        Maze2DProblem::new(space, start, goal).unwrap()
    }

    #[test]
    fn random_mazes() {
        let mut solved = 0usize;
        let mut unsolved = 0usize;

        for seed in 0..300u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let problem = random_problem(&mut rng);
            let dist = distances(&problem);

            for strategy in STRATEGIES {
                let (outcome, reports) = solve(&problem, strategy);
                let name = strategy.name();

                // Every removal but the goal's expands a new state.
                let expanded = reports.iter().filter(|r| r.explored.len() == 1).count();
                assert_eq!(expanded, outcome.explored().len(), "{name} seed={seed}");

                match (&outcome, dist.get(&problem.goal())) {
                    (Outcome::Solved(solution), Some(&d)) => {
                        let path = &solution.path;
                        assert_eq!(path.start, Some(problem.start()));
                        assert_eq!(path.end, Some(problem.goal()));
                        assert_eq!(path.actions.len(), path.states.len());
                        assert!(problem.space().valid_path(path), "{name} seed={seed}");
                        assert!(path.len() >= d);

                        // No cell is visited twice
                        let mut cells: FxHashSet<Maze2DState> =
                            path.cells().iter().copied().collect();
                        cells.insert(problem.start());
                        assert_eq!(cells.len(), path.len() + 1, "{name} seed={seed}");

                        assert_eq!(solution.steps_explored, solution.explored.len() + 1);
                        assert!(
                            !solution.explored.contains(&problem.goal())
                                || problem.goal() == problem.start()
                        );
                        if name == "Breadth First search" {
                            assert_eq!(path.len(), d, "seed={seed}");
                        }

                        let last = reports.last().unwrap();
                        assert!(last.is_solution());
                        assert_eq!(last.steps, solution.steps_explored);
                        solved += 1;
                    }
                    (Outcome::NoSolution { explored, steps_explored }, None) => {
                        let reachable: FxHashSet<Maze2DState> = dist.keys().copied().collect();
                        assert_eq!(explored, &reachable, "{name} seed={seed}");
                        assert_eq!(*steps_explored, reachable.len());
                        assert!(reports.last().unwrap().is_no_solution());
                        unsolved += 1;
                    }
                    (outcome, d) => panic!("{name} seed={seed}: {outcome:?} but distance is {d:?}"),
                }
            }
        }

        // Make sure both branches are covered.
        assert!(solved > 0);
        assert!(unsolved > 0);
    }

    #[test]
    fn sample_mazes() {
        let expected = [
            ("corridors.txt", Some(18)),
            ("open_field.txt", Some(29)),
            ("spiral.txt", Some(56)),
            ("walled_off.txt", None),
        ];
        for (file, distance) in expected {
            let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("data/mazes")
                .join(file);
            let problem = Maze2DProblem::try_from(path.as_path()).unwrap();

            let (outcome, _) = solve(&problem, &BreadthFirst);
            assert_eq!(outcome.path().map(|p| p.len()), distance, "{file}");
            for strategy in STRATEGIES {
                let (outcome, _) = solve(&problem, strategy);
                assert_eq!(outcome.is_solved(), distance.is_some(), "{file}");
            }
        }
    }

    #[test]
    fn searches_share_a_problem() {
        let problem = Maze2DProblem::try_from(indoc! {"
            A....
            .***.
            ....B
        "})
        .unwrap();

        let outcomes: Vec<M2DOutcome> = std::thread::scope(|scope| {
            let handles: Vec<_> = STRATEGIES
                .iter()
                .map(|strategy| {
                    let problem = &problem;
                    let strategy: &M2DStrategy = *strategy;
                    scope.spawn(move || {
                        search(problem, strategy, &mut |_r: Report<Maze2DState>| {}).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (outcome, strategy) in outcomes.iter().zip(STRATEGIES) {
            assert_eq!(outcome, &solve(&problem, strategy).0);
            assert_eq!(outcome.path().unwrap().len(), 6);
        }
    }
}
