use crate::assembler::Example;
use std::collections::HashMap;

/// The queryable collection of assembled examples for one documentation
/// build.
///
/// The store is an explicitly owned object: the build process constructs
/// one, fills it from a scan pass, hands it by reference to renderer
/// code, and calls [`reset`](Self::reset) (or drops it) between
/// independent builds. Iteration order is the order examples were first
/// inserted, stable until the next mutation.
#[derive(Debug, Default)]
pub struct ExampleStore {
    index: HashMap<String, usize>,
    examples: Vec<Example>,
}

impl ExampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an example, replacing any previous example of the same
    /// name in place. Replacement is how a fresh scan pass supersedes a
    /// stale one; within one pass, name collisions were already resolved
    /// by the assembler.
    pub fn put(&mut self, example: Example) {
        match self.index.get(&example.name) {
            Some(&slot) => self.examples[slot] = example,
            None => {
                self.index.insert(example.name.clone(), self.examples.len());
                self.examples.push(example);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Example> {
        self.index.get(name).map(|&slot| &self.examples[slot])
    }

    /// All examples, in first-inserted order. Re-iterating yields the
    /// same snapshot until the store is mutated.
    pub fn all(&self) -> impl Iterator<Item = &Example> {
        self.examples.iter()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Clears the store for the next build.
    pub fn reset(&mut self) {
        self.index.clear();
        self.examples.clear();
    }
}
