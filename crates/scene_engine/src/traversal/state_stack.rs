//! Collapsing state stack
//!
//! A stack of values where [`CollapsingStateStack::push`] does not copy
//! anything: it only records that a new level shares the current value. The
//! copy happens the first time that level is written. Pushing into a subtree
//! that never changes the state (a mesh-only node, say) therefore costs a
//! counter increment, and [`CollapsingStateStack::pop`] on such a level is
//! equally cheap.
//!
//! Observable behaviour is that of a plain copy-on-push stack: after a pop,
//! `top()` is exactly what it was before the matching push.

use thiserror::Error;

/// Pop attempted on the base level
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("State stack popped below its base level")]
pub struct StackUnderflow;

#[derive(Debug, Clone)]
struct Level<T> {
    value: T,
    /// Further logical levels sharing `value` above this one
    shared: usize,
}

/// Stack of accumulated state with lazy copy on write
#[derive(Debug, Clone)]
pub struct CollapsingStateStack<T> {
    levels: Vec<Level<T>>,
    initial: T,
}

impl<T: Clone> CollapsingStateStack<T> {
    /// Stack with a single base level holding `initial`
    pub fn new(initial: T) -> Self {
        Self {
            levels: vec![Level { value: initial.clone(), shared: 0 }],
            initial,
        }
    }

    /// Start a new level holding a copy of the current top
    pub fn push(&mut self) {
        self.last_mut().shared += 1;
    }

    /// Discard the current level, exposing the previous one unchanged
    ///
    /// # Errors
    /// [`StackUnderflow`] on the base level; the stack is left as is.
    pub fn pop(&mut self) -> Result<(), StackUnderflow> {
        let last = self.last_mut();
        if last.shared > 0 {
            last.shared -= 1;
            return Ok(());
        }
        if self.levels.len() == 1 {
            return Err(StackUnderflow);
        }
        self.levels.pop();
        Ok(())
    }

    /// Value of the current level
    pub fn top(&self) -> &T {
        // levels is never empty: pop refuses to remove the base level
        &self.levels[self.levels.len() - 1].value
    }

    /// Replace the value of the current level only
    pub fn set_top(&mut self, value: T) {
        *self.top_mut() = value;
    }

    /// Mutable access to the current level only
    pub fn top_mut(&mut self) -> &mut T {
        self.materialize();
        &mut self.last_mut().value
    }

    /// Back to a single level holding the initial value
    pub fn clear(&mut self) {
        self.levels.truncate(1);
        self.levels[0] = Level { value: self.initial.clone(), shared: 0 };
    }

    /// Back to a single level holding `initial`, which becomes the new initial value
    pub fn reset(&mut self, initial: T) {
        self.initial = initial;
        self.clear();
    }

    /// Number of logical levels, the base included
    pub fn depth(&self) -> usize {
        self.levels.iter().map(|l| l.shared + 1).sum()
    }

    /// Split off a private copy if the current level is shared
    fn materialize(&mut self) {
        let last = self.last_mut();
        if last.shared > 0 {
            last.shared -= 1;
            let value = last.value.clone();
            self.levels.push(Level { value, shared: 0 });
        }
    }

    fn last_mut(&mut self) -> &mut Level<T> {
        let i = self.levels.len() - 1;
        &mut self.levels[i]
    }
}

impl<T: Clone + Default> Default for CollapsingStateStack<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
