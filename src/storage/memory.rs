use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use super::HighScoreStore;

/// In-process store for runs that should not touch the disk
///
/// Clones share the same value and count saves, so a caller can keep a
/// handle to observe what the game persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<u32>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    /// Number of times `save` has been called
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32> {
        Ok(self.value.get())
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        self.value.set(high_score);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
