use smallvec::SmallVec;

/// One indentation level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Indent {
    /// The level opened a block.
    pub is_block: bool,
    /// Leading whitespace characters.
    pub n: u32,
}

impl Indent {
    pub const fn new(n: u32, is_block: bool) -> Self {
        Indent { is_block, n }
    }
}

/// The current indentation level plus the levels it is nested in.
#[derive(Clone, Debug, Default)]
pub struct IndentStack {
    current: Indent,
    saved: SmallVec<[Indent; 16]>,
}

impl IndentStack {
    pub fn new() -> Self {
        IndentStack::default()
    }

    #[inline]
    pub fn current(&self) -> Indent {
        self.current
    }

    /// Enter `indent`, saving the current level.
    pub fn push(&mut self, indent: Indent) {
        self.saved.push(self.current);
        self.current = indent;
    }

    /// Leave the current level and return it. `None` at the outermost level.
    pub fn pop(&mut self) -> Option<Indent> {
        let outer = self.saved.pop()?;
        Some(std::mem::replace(&mut self.current, outer))
    }

    /// Number of levels entered.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Pop every level deeper than `n` whitespace characters, returning how
    /// many of them were blocks.
    pub fn unwind_to(&mut self, n: u32) -> usize {
        let mut blocks = 0;
        while self.current.n > n {
            match self.pop() {
                Some(level) if level.is_block => blocks += 1,
                Some(_) => {}
                None => break,
            }
        }
        blocks
    }
}

#[cfg(test)]
mod tests;
