//! Dense square matrix.

/// A dense n×n matrix stored in row-major order.
///
/// Used for the edge-weight seed, the distance matrix and the predecessor
/// matrix.  Indices are plain `usize` station positions.
///
/// # Examples
///
/// ```
/// use fleet_network::Matrix;
///
/// let mut m = Matrix::new(3, 0u32);
/// m.set(0, 2, 7);
/// assert_eq!(m.get(0, 2), 7);
/// assert_eq!(m.row(0), &[0, 0, 7]);
/// assert_eq!(m.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    data: Vec<T>,
    size: usize,
}

impl<T: Copy> Matrix<T> {
    /// Creates a `size`×`size` matrix with every cell set to `fill`.
    pub fn new(size: usize, fill: T) -> Self {
        Self {
            data: vec![fill; size * size],
            size,
        }
    }

    /// Returns the cell at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.size + col] = value;
    }

    /// Contiguous slice of one row.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<T: Copy + PartialEq> Matrix<T> {
    /// `true` if `m[i][j] == m[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
