//! Implementation of search algorithms.
//!
//! A single driver (`graph_search`) does path-finding on generic search
//! problems. What makes it depth-first, breadth-first, greedy best-first or
//! A* is the `Strategy` it removes frontier nodes with.

pub mod astar;
pub mod breadth_first;
pub mod depth_first;
pub mod graph_search;
pub mod greedy_best_first;
