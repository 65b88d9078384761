//! Concrete problems to search over.
//!
//! Only text mazes for now, see `maze_2d`.

pub mod maze_2d;
