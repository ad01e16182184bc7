//! Partition of a qubit lattice into equal cells.

use std::fmt;

use crate::error::{PqcaError, PqcaResult};
use crate::vector::Vector;

/// A partition of qubits 0..n into equally sized cells.
///
/// Each qubit appears in exactly one cell. The update rule of an
/// automaton is applied to every cell of a tessellation in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tessellation {
    cells: Vec<Vec<usize>>,
    size: usize,
}

impl Tessellation {
    /// Validate a list of cells as a tessellation.
    pub fn new(cells: Vec<Vec<usize>>) -> PqcaResult<Self> {
        if cells.is_empty() {
            return Err(PqcaError::NoCells);
        }
        let cell_size = cells[0].len();
        for (index, cell) in cells.iter().enumerate() {
            if cell.is_empty() {
                return Err(PqcaError::EmptyCell { index });
            }
            if cell.len() != cell_size {
                return Err(PqcaError::IrregularCellSize {
                    index,
                    expected: cell_size,
                    got: cell.len(),
                });
            }
        }

        let size: usize = cells.iter().map(Vec::len).sum();
        let mut seen = vec![false; size];
        for &qubit in cells.iter().flatten() {
            if qubit >= size || seen[qubit] {
                return Err(PqcaError::PartitionUnevenlyCoversQubits { qubit });
            }
            seen[qubit] = true;
        }

        Ok(Self { cells, size })
    }

    /// The cells, each a list of qubit names.
    pub fn cells(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Total number of qubits covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of qubits in each cell.
    pub fn cell_size(&self) -> usize {
        self.cells[0].len()
    }

    /// Shift every qubit name by the given amount, wrapping around the
    /// lattice.
    pub fn shifted_by(&self, amount: i64) -> Self {
        let size = self.size as i64;
        // A shift composed with the modulo reduction is a bijection on
        // 0..size, so no re-validation is needed.
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                cell.iter()
                    .map(|&q| (q as i64 + amount).rem_euclid(size) as usize)
                    .collect()
            })
            .collect();
        Self {
            cells,
            size: self.size,
        }
    }

    /// Rename every qubit, reducing names modulo the lattice size when
    /// `rename_modulo_size` is set.
    ///
    /// The renamed cells are validated as a fresh tessellation, so a
    /// rename that is not a bijection on 0..size (or, without the
    /// reduction, one that leaves the lattice) is an error.
    pub fn update_names(
        &self,
        name_update: impl Fn(i64) -> i64,
        rename_modulo_size: bool,
    ) -> PqcaResult<Self> {
        let size = self.size as i64;
        let cells = self
            .cells
            .iter()
            .map(|cell| {
                cell.iter()
                    .map(|&q| {
                        let name = name_update(q as i64);
                        let name = if rename_modulo_size {
                            name.rem_euclid(size)
                        } else {
                            name
                        };
                        usize::try_from(name)
                            .map_err(|_| PqcaError::PartitionUnevenlyCoversQubits { qubit: q })
                    })
                    .collect::<PqcaResult<Vec<_>>>()
            })
            .collect::<PqcaResult<Vec<_>>>()?;
        Self::new(cells)
    }
}

impl fmt::Display for Tessellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tessellation({} qubits as {} cells, first cell: {:?})",
            self.size,
            self.cells.len(),
            self.cells[0]
        )
    }
}

/// Partition a line of `num_qubits` qubits into cells of `cell_size`.
pub fn one_dimensional(num_qubits: usize, cell_size: usize) -> PqcaResult<Tessellation> {
    n_dimensional(&[num_qubits], &[cell_size])
}

/// Partition an n-dimensional lattice into n-dimensional cuboids.
///
/// `dimensions` gives the lattice extent in each dimension, for example
/// `[5, 5, 10]` for a 5 by 5 by 10 cuboid; `cell` gives the cell extent
/// and must divide the lattice extent component-wise. Lattice points are
/// flattened to linear qubit names via [`vector_to_name`].
pub fn n_dimensional(dimensions: &[usize], cell: &[usize]) -> PqcaResult<Tessellation> {
    let mismatch = || PqcaError::IrregularCoordinateDimensions {
        dimensions: dimensions.to_vec(),
        cell: cell.to_vec(),
    };
    if dimensions.len() != cell.len() || dimensions.is_empty() {
        return Err(mismatch());
    }
    for (length, cell_length) in dimensions.iter().zip(cell) {
        if *cell_length == 0 || length % cell_length != 0 {
            return Err(mismatch());
        }
    }

    // One focal point per cell, at the cell's lexicographically first
    // lattice point.
    let focal_points = cartesian_product(
        &dimensions
            .iter()
            .zip(cell)
            .map(|(length, step)| (0..*length as i64).step_by(*step).collect())
            .collect::<Vec<_>>(),
    );

    let first_cell = cell_of_given_size(cell);

    let cells = focal_points
        .iter()
        .map(|focal_point| {
            first_cell
                .iter()
                .map(|delta| vector_to_name(&(focal_point + delta), dimensions))
                .collect()
        })
        .collect();

    Tessellation::new(cells)
}

/// The lattice points of a cell anchored at the origin.
fn cell_of_given_size(cell: &[usize]) -> Vec<Vector> {
    cartesian_product(
        &cell
            .iter()
            .map(|length| (0..*length as i64).collect())
            .collect::<Vec<_>>(),
    )
}

fn cartesian_product(axes: &[Vec<i64>]) -> Vec<Vector> {
    let mut points = vec![Vector::default()];
    for axis in axes {
        let mut next = Vec::with_capacity(points.len() * axis.len());
        for point in &points {
            for value in axis {
                next.push(point.extend(*value));
            }
        }
        points = next;
    }
    points
}

/// Flatten a lattice coordinate to its lexicographic linear name.
pub fn vector_to_name(qubit_vector: &Vector, dimensions: &[usize]) -> usize {
    qubit_vector
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let weight: usize = dimensions[index + 1..].iter().product();
            *entry as usize * weight
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_dimensional() {
        let tessellation = one_dimensional(10, 2).unwrap();
        assert_eq!(tessellation.size(), 10);
        assert_eq!(tessellation.num_cells(), 5);
        assert_eq!(tessellation.cells()[0], vec![0, 1]);
        assert_eq!(tessellation.cells()[4], vec![8, 9]);
    }

    #[test]
    fn test_display() {
        let tessellation = one_dimensional(10, 2).unwrap();
        assert_eq!(
            tessellation.to_string(),
            "Tessellation(10 qubits as 5 cells, first cell: [0, 1])"
        );
    }

    #[test]
    fn test_indivisible_rejected() {
        assert!(matches!(
            one_dimensional(10, 3),
            Err(PqcaError::IrregularCoordinateDimensions { .. })
        ));
    }

    #[test]
    fn test_no_cells_rejected() {
        assert!(matches!(Tessellation::new(vec![]), Err(PqcaError::NoCells)));
    }

    #[test]
    fn test_empty_cell_rejected() {
        assert!(matches!(
            Tessellation::new(vec![vec![]]),
            Err(PqcaError::EmptyCell { .. })
        ));
    }

    #[test]
    fn test_irregular_cells_rejected() {
        assert!(matches!(
            Tessellation::new(vec![vec![0, 1], vec![2]]),
            Err(PqcaError::IrregularCellSize { .. })
        ));
    }

    #[test]
    fn test_duplicate_qubit_rejected() {
        assert!(matches!(
            Tessellation::new(vec![vec![0, 1], vec![1, 2]]),
            Err(PqcaError::PartitionUnevenlyCoversQubits { .. })
        ));
    }

    #[test]
    fn test_gap_rejected() {
        // Qubit 3 named but only 3 qubits covered: not a partition.
        assert!(matches!(
            Tessellation::new(vec![vec![0], vec![1], vec![3]]),
            Err(PqcaError::PartitionUnevenlyCoversQubits { .. })
        ));
    }

    #[test]
    fn test_shifted_by_wraps() {
        let tessellation = one_dimensional(4, 2).unwrap();
        let shifted = tessellation.shifted_by(1);
        assert_eq!(shifted.cells()[0], vec![1, 2]);
        assert_eq!(shifted.cells()[1], vec![3, 0]);
    }

    #[test]
    fn test_shifted_by_negative() {
        let tessellation = one_dimensional(4, 2).unwrap();
        let shifted = tessellation.shifted_by(-1);
        assert_eq!(shifted.cells()[0], vec![3, 0]);
    }

    #[test]
    fn test_update_names_without_wrap() {
        // Reflection is a bijection on 0..size, no reduction needed.
        let tessellation = one_dimensional(4, 2).unwrap();
        let reflected = tessellation.update_names(|name| 3 - name, false).unwrap();
        assert_eq!(reflected.cells()[0], vec![3, 2]);
        assert_eq!(reflected.cells()[1], vec![1, 0]);
    }

    #[test]
    fn test_update_names_without_wrap_leaving_lattice() {
        // An unreduced shift pushes names past the lattice edge.
        let tessellation = one_dimensional(4, 2).unwrap();
        assert!(matches!(
            tessellation.update_names(|name| name + 1, false),
            Err(PqcaError::PartitionUnevenlyCoversQubits { .. })
        ));
        assert!(matches!(
            tessellation.update_names(|name| name - 1, false),
            Err(PqcaError::PartitionUnevenlyCoversQubits { .. })
        ));
    }

    #[test]
    fn test_update_names_with_wrap_matches_shift() {
        let tessellation = one_dimensional(6, 2).unwrap();
        let renamed = tessellation.update_names(|name| name + 2, true).unwrap();
        assert_eq!(renamed, tessellation.shifted_by(2));
    }

    #[test]
    fn test_update_names_rejects_collisions() {
        let tessellation = one_dimensional(4, 2).unwrap();
        assert!(matches!(
            tessellation.update_names(|_| 0, true),
            Err(PqcaError::PartitionUnevenlyCoversQubits { .. })
        ));
    }

    #[test]
    fn test_two_dimensional() {
        let tessellation = n_dimensional(&[4, 4], &[2, 2]).unwrap();
        assert_eq!(tessellation.size(), 16);
        assert_eq!(tessellation.num_cells(), 4);
        // First cell: the 2x2 block anchored at the origin.
        assert_eq!(tessellation.cells()[0], vec![0, 1, 4, 5]);
    }

    #[test]
    fn test_vector_to_name() {
        assert_eq!(vector_to_name(&Vector::new([0, 0]), &[4, 4]), 0);
        assert_eq!(vector_to_name(&Vector::new([1, 0]), &[4, 4]), 4);
        assert_eq!(vector_to_name(&Vector::new([1, 2]), &[4, 4]), 6);
        assert_eq!(
            vector_to_name(&Vector::new([1, 2, 3]), &[6, 5, 4]),
            1 * 5 * 4 + 2 * 4 + 3
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn one_dimensional_covers_exactly(cells in 1usize..20, cell_size in 1usize..8) {
                let tessellation = one_dimensional(cells * cell_size, cell_size).unwrap();
                let mut seen = vec![0u32; tessellation.size()];
                for &q in tessellation.cells().iter().flatten() {
                    seen[q] += 1;
                }
                prop_assert!(seen.iter().all(|&count| count == 1));
            }

            #[test]
            fn shifts_preserve_validity(cells in 1usize..10, cell_size in 1usize..6, amount in -50i64..50) {
                let tessellation = one_dimensional(cells * cell_size, cell_size).unwrap();
                let shifted = tessellation.shifted_by(amount);
                // Re-validation succeeds: shifting is a bijection.
                prop_assert!(Tessellation::new(shifted.cells().to_vec()).is_ok());
            }
        }
    }
}
