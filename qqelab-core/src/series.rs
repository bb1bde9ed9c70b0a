//! Fixed-depth bar-indexed series.
//!
//! The pipeline never reads further back than two bars, so every series keeps
//! only its last `N` values in a ring. Index 0 is the current bar, 1 the
//! previous bar, and so on.

/// Last-`N` values of an append-only series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window<T: Copy, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    len: usize,
}

impl<T: Copy, const N: usize> Default for Window<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> Window<T, N> {
    pub fn new() -> Self {
        assert!(N >= 1, "window depth must be >= 1");
        Self {
            slots: [None; N],
            head: 0,
            len: 0,
        }
    }

    /// Append the value for a new bar; the oldest retained value drops out.
    pub fn push(&mut self, value: T) {
        self.head = (self.head + 1) % N;
        self.slots[self.head] = Some(value);
        self.len = (self.len + 1).min(N);
    }

    /// Value `bars_ago` bars back, if it has been produced and is still retained.
    pub fn get(&self, bars_ago: usize) -> Option<T> {
        if bars_ago >= self.len {
            return None;
        }
        self.slots[(self.head + N - bars_ago) % N]
    }

    pub fn current(&self) -> Option<T> {
        self.get(0)
    }

    pub fn previous(&self) -> Option<T> {
        self.get(1)
    }

    /// Number of retained values (at most `N`).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
