//! The six named matrix slots the calculator operates on.

/// Compile-time matrix dimension.
pub const MATRIX_SIZE: usize = 4;
/// Number of cells in a matrix, and the length of a `read_mat` element list.
pub const ELEMENT_COUNT: usize = MATRIX_SIZE * MATRIX_SIZE;

/// Slot names, in registry order.
pub const SLOT_NAMES: [&str; 6] = ["MAT_A", "MAT_B", "MAT_C", "MAT_D", "MAT_E", "MAT_F"];

/// A square `MATRIX_SIZE` x `MATRIX_SIZE` matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix {
    cells: [[f64; MATRIX_SIZE]; MATRIX_SIZE],
}

impl Matrix {
    /// The all-zero matrix.
    pub fn zeros() -> Self {
        Self::default()
    }

    /// Build a matrix cell by cell from `f(row, col)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut m = Matrix::zeros();
        for (i, row) in m.cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = f(i, j);
            }
        }
        m
    }

    /// Row-major load. Cells beyond the end of `elements` are zero.
    pub fn from_elements(elements: &[f64]) -> Self {
        Matrix::from_fn(|i, j| {
            elements
                .get(i * MATRIX_SIZE + j)
                .copied()
                .unwrap_or_default()
        })
    }

    /// Cell at `row`, `col`. Panics when either is out of range.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64; MATRIX_SIZE]> {
        self.cells.iter()
    }
}

/// Index of a registered slot. Only produced by [`SlotRegistry::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Position of the slot in [`SLOT_NAMES`].
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: &'static str,
    matrix: Matrix,
}

/// Owns the storage of every slot.
///
/// Inputs are handed out as shared borrows; a result is installed as a
/// whole, replacing (and dropping) the previous matrix of that slot.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotRegistry {
    /// All slots, zero-filled.
    pub fn new() -> Self {
        SlotRegistry {
            slots: SLOT_NAMES
                .iter()
                .map(|&name| Slot {
                    name,
                    matrix: Matrix::zeros(),
                })
                .collect(),
        }
    }

    /// Exact-match name lookup.
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        self.slots.iter().position(|s| s.name == name).map(SlotId)
    }

    /// Name the slot was registered under.
    pub fn name(&self, id: SlotId) -> &'static str {
        self.slots[id.0].name
    }

    /// Current contents of a slot.
    pub fn get(&self, id: SlotId) -> &Matrix {
        &self.slots[id.0].matrix
    }

    /// Replace the contents of a slot with `matrix`.
    pub fn install(&mut self, id: SlotId, matrix: Matrix) {
        self.slots[id.0].matrix = matrix;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_knows_exactly_the_six_slots() {
        let reg = SlotRegistry::new();
        for (i, name) in SLOT_NAMES.iter().enumerate() {
            let id = reg.lookup(name).unwrap();
            assert_eq!(id.index(), i);
            assert_eq!(reg.name(id), *name);
        }
        assert!(reg.lookup("MAT_G").is_none());
        assert!(reg.lookup("mat_a").is_none());
        assert!(reg.lookup("").is_none());
    }

    #[test]
    fn slots_start_zeroed() {
        let reg = SlotRegistry::new();
        let id = reg.lookup("MAT_F").unwrap();
        assert_eq!(*reg.get(id), Matrix::zeros());
    }

    #[test]
    fn from_elements_zero_fills_missing_cells() {
        let m = Matrix::from_elements(&[1.0, 2.0, 3.0]);
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(3, 3), 0.0);
    }

    #[test]
    fn install_replaces_only_the_target() {
        let mut reg = SlotRegistry::new();
        let a = reg.lookup("MAT_A").unwrap();
        let b = reg.lookup("MAT_B").unwrap();
        let m = Matrix::from_fn(|i, j| (i + j) as f64);
        reg.install(b, m);
        assert_eq!(*reg.get(b), m);
        assert_eq!(*reg.get(a), Matrix::zeros());
    }
}
