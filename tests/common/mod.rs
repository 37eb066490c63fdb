use qrcnv::{EcLevel, ModuleMatrix, SymbolSet};

/// Builds a valid-looking symbol: real finder patterns in three corners and
/// a deterministic pseudo-random fill everywhere else.
pub fn test_matrix(dim: usize) -> ModuleMatrix {
    patterned_matrix(dim, 0)
}

/// Like [`test_matrix`] but with the fill offset by `seed`, so symbols of a
/// set are distinguishable.
pub fn patterned_matrix(dim: usize, seed: usize) -> ModuleMatrix {
    ModuleMatrix::from_fn(dim, EcLevel::M, |row, col| module(dim, row, col, seed))
        .expect("test matrix dimension should be valid")
}

pub fn test_set(dim: usize, num: usize) -> SymbolSet {
    let mut set = SymbolSet::new(num).expect("test set size should be valid");
    for seed in 0..num {
        set.append(patterned_matrix(dim, seed)).expect("append should succeed");
    }
    set.finalize().expect("finalize should succeed");
    set
}

fn module(dim: usize, row: usize, col: usize, seed: usize) -> bool {
    if row < 8 && col < 8 {
        finder(row, col)
    } else if row < 8 && col >= dim - 8 {
        finder(row, dim - 1 - col)
    } else if row >= dim - 8 && col < 8 {
        finder(dim - 1 - row, col)
    } else {
        (row * 31 + col * 17 + seed * 7) % 3 == 0
    }
}

/// Finder pattern plus its separator: a 3x3 black core, a white ring, a
/// black ring, and a white outer row/column at index 7.
fn finder(i: usize, j: usize) -> bool {
    if i >= 7 || j >= 7 {
        return false;
    }
    i.abs_diff(3).max(j.abs_diff(3)) != 2
}
