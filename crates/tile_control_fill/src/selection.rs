//! A set of map cells stored as one bit per cell

const WORD_BITS: usize = u64::BITS as usize;

/// A set of `(x, y)` cells on a `width` x `height` map.
///
/// Membership checks are O(1); iteration is row-major (all of row 0, then row 1, ...).
/// Cells outside the map are never members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelection {
    width: u32,
    height: u32,
    words: Vec<u64>,
}

impl TileSelection {
    /// Create a selection with no cells
    pub fn empty(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Create a selection with every cell of the map
    pub fn full(width: u32, height: u32) -> Self {
        let mut selection = Self::empty(width, height);
        selection.words.fill(u64::MAX);
        selection.clear_padding();
        selection
    }

    /// Create a selection from a list of cells; off-map cells are dropped
    pub fn from_cells(width: u32, height: u32, cells: impl IntoIterator<Item = (i32, i32)>) -> Self {
        let mut selection = Self::empty(width, height);
        for (x, y) in cells {
            selection.insert(x, y);
        }
        selection
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn bit(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bit(x, y)
            .is_some_and(|bit| self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0)
    }

    /// Add a cell. Returns true if it was newly added.
    pub fn insert(&mut self, x: i32, y: i32) -> bool {
        let Some(bit) = self.bit(x, y) else {
            return false;
        };
        let word = &mut self.words[bit / WORD_BITS];
        let mask = 1 << (bit % WORD_BITS);
        let added = *word & mask == 0;
        *word |= mask;
        added
    }

    /// Remove a cell. Returns true if it was present.
    pub fn remove(&mut self, x: i32, y: i32) -> bool {
        let Some(bit) = self.bit(x, y) else {
            return false;
        };
        let word = &mut self.words[bit / WORD_BITS];
        let mask = 1 << (bit % WORD_BITS);
        let removed = *word & mask != 0;
        *word &= !mask;
        removed
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Iterate the selected cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let width = self.width as usize;
        (0..self.cell_count())
            .filter(move |&bit| self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0)
            .map(move |bit| ((bit % width) as i32, (bit / width) as i32))
    }

    /// Keep only the cells for which `keep` returns true
    pub fn retain(&mut self, mut keep: impl FnMut(i32, i32) -> bool) {
        let cells: Vec<(i32, i32)> = self.iter().collect();
        for (x, y) in cells {
            if !keep(x, y) {
                self.remove(x, y);
            }
        }
    }

    /// Every map cell not in this selection
    pub fn complement(&self) -> Self {
        let mut result = Self {
            width: self.width,
            height: self.height,
            words: self.words.iter().map(|w| !w).collect(),
        };
        result.clear_padding();
        result
    }

    /// Cells in either selection. Both must cover the same map.
    pub fn union(&self, other: &Self) -> Self {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        Self {
            width: self.width,
            height: self.height,
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a | b)
                .collect(),
        }
    }

    /// Zero the bits past the last cell so counts and equality stay exact
    fn clear_padding(&mut self) {
        let used = self.cell_count() % WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}
