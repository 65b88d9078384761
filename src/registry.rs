//! Strategies by name.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::algorithms::astar::AStar;
use crate::algorithms::breadth_first::BreadthFirst;
use crate::algorithms::depth_first::DepthFirst;
use crate::algorithms::greedy_best_first::GreedyBestFirst;
use crate::frontier::Strategy;
use crate::space::Cost;
use crate::space::State;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown strategy {name:?}, expected one of: {}", .available.join(", "))]
    UnknownStrategy { name: String, available: Vec<String> },
    #[error("Strategy {0:?} is already registered")]
    DuplicateStrategy(String),
}

/// Named strategies, kept in registration order.
#[derive(Debug)]
pub struct StrategyRegistry<St, C>
where
    St: State,
    C: Cost,
{
    strategies: Vec<(String, Box<dyn Strategy<St, C>>)>,
    by_name: FxHashMap<String, usize>,
}

impl<St, C> StrategyRegistry<St, C>
where
    St: State,
    C: Cost,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: vec![],
            by_name: FxHashMap::default(),
        }
    }

    /// The four built-in strategies under their usual names.
    #[must_use]
    pub fn with_defaults() -> Self {
        let defaults: [Box<dyn Strategy<St, C>>; 4] = [
            Box::new(AStar),
            Box::new(BreadthFirst),
            Box::new(DepthFirst),
            Box::new(GreedyBestFirst),
        ];

        let mut registry = Self::new();
        for strategy in defaults {
            let name = strategy.name().to_string();
            registry.strategies.push((name.clone(), strategy));
            registry.by_name.insert(name, registry.strategies.len() - 1);
        }
        registry
    }

    /// Names must be unique, replacing a strategy is not supported.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        strategy: Box<dyn Strategy<St, C>>,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateStrategy(name));
        }
        log::debug!("Registering {name:?} ({strategy:?})");
        self.by_name.insert(name.clone(), self.strategies.len());
        self.strategies.push((name, strategy));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&dyn Strategy<St, C>, RegistryError> {
        match self.by_name.get(name) {
            Some(&i) => Ok(self.strategies[i].1.as_ref()),
            None => Err(RegistryError::UnknownStrategy {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            }),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|(name, _s)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Strategy<St, C>)> {
        self.strategies
            .iter()
            .map(|(name, s)| (name.as_str(), s.as_ref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<St, C> Default for StrategyRegistry<St, C>
where
    St: State,
    C: Cost,
{
    fn default() -> Self {
        Self::with_defaults()
    }
}
