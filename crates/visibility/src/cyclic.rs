use getset::CopyGetters;

/// Index into a ring of `len` items. Any signed offset wraps around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, CopyGetters)]
#[get_copy = "pub"]
pub struct CyclicIndex {
    index: usize,
    len: usize,
}

impl CyclicIndex {
    pub fn new(raw_index: isize, len: usize) -> Self {
        assert!(len > 0, "no index into an empty ring");
        CyclicIndex {
            index: raw_index.rem_euclid(len as isize) as usize,
            len,
        }
    }
    pub fn stepped(&self, steps: isize) -> Self {
        Self::new(self.index as isize + steps, self.len)
    }
    pub fn next(&self) -> Self {
        self.stepped(1)
    }
    pub fn previous(&self) -> Self {
        self.stepped(-1)
    }
    /// Starts at `self`, then keeps stepping. Endless.
    pub fn walk(self, step: isize) -> impl Iterator<Item = CyclicIndex> {
        std::iter::successors(Some(self), move |index| Some(index.stepped(step)))
    }
}
