use crate::Error;

/// Maximum number of symbols in a structured-append sequence.
pub const STA_MAX: usize = 16;

/// QR error-correction level.
///
/// The converters do not compute error correction; the level is upstream
/// metadata surfaced in the SVG `<desc>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl EcLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }
}

impl std::str::FromStr for EcLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<EcLevel, Error> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            _ => Err(Error::InvalidParameter("error correction level must be one of L, M, Q, H")),
        }
    }
}

/// One finalized QR symbol: an immutable square grid of black/white modules.
///
/// The matrix is produced by an upstream QR encoder; the converters only
/// query it through [`ModuleMatrix::is_black`].
#[derive(Debug, Clone)]
pub struct ModuleMatrix {
    dim: usize,
    ecl: EcLevel,
    bits: Vec<bool>,
}

impl ModuleMatrix {
    /// Creates a matrix from a cell predicate. `f(row, col)` returns whether
    /// the module is dark.
    pub fn from_fn<F>(dim: usize, ecl: EcLevel, f: F) -> Result<ModuleMatrix, Error>
    where
        F: Fn(usize, usize) -> bool,
    {
        check_dim(dim)?;
        let mut bits = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            for col in 0..dim {
                bits.push(f(row, col));
            }
        }
        Ok(ModuleMatrix { dim, ecl, bits })
    }

    /// Parses a matrix from text: one line per row, `#`, `1`, or `*` marking
    /// dark modules. Rows must form a square of a valid symbol dimension.
    pub fn parse_text(text: &str, ecl: EcLevel) -> Result<ModuleMatrix, Error> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let dim = rows.len();
        check_dim(dim)?;
        let mut bits = Vec::with_capacity(dim * dim);
        for row in &rows {
            let cells: Vec<char> = row.chars().collect();
            if cells.len() != dim {
                return Err(Error::InvalidParameter("matrix rows must form a square"));
            }
            for cell in cells {
                bits.push(matches!(cell, '#' | '1' | '*'));
            }
        }
        Ok(ModuleMatrix { dim, ecl, bits })
    }

    /// Side length of the matrix, in modules.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn ecl(&self) -> EcLevel {
        self.ecl
    }

    /// Symbol version derived from the side length (`dim = 17 + 4 * version`).
    pub fn version(&self) -> usize {
        (self.dim - 17) / 4
    }

    /// Whether the module at `(row, col)` is dark.
    pub fn is_black(&self, row: usize, col: usize) -> bool {
        self.bits[row * self.dim + col]
    }
}

fn check_dim(dim: usize) -> Result<(), Error> {
    // version 1 is 21x21; each version adds 4 modules per side
    if dim < 21 || (dim - 17) % 4 != 0 {
        return Err(Error::InvalidDimension(dim));
    }
    Ok(())
}

/// An ordered structured-append sequence of up to [`STA_MAX`] symbols
/// sharing one dimension and error-correction level.
///
/// The set follows the upstream encoder's lifecycle: symbols are appended
/// one by one, then the set is finalized; converters refuse unfinalized
/// sets.
#[derive(Debug, Clone)]
pub struct SymbolSet {
    symbols: Vec<ModuleMatrix>,
    max: usize,
    finalized: bool,
}

impl SymbolSet {
    /// Creates an empty set with a declared capacity of `max` symbols.
    pub fn new(max: usize) -> Result<SymbolSet, Error> {
        if max == 0 || max > STA_MAX {
            return Err(Error::InvalidParameter("maximum symbol count must be between 1 and 16"));
        }
        Ok(SymbolSet {
            symbols: Vec::with_capacity(max),
            max,
            finalized: false,
        })
    }

    /// Appends the next symbol of the sequence.
    pub fn append(&mut self, symbol: ModuleMatrix) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::InvalidState("append to a finalized symbol set"));
        }
        if self.symbols.len() == self.max {
            return Err(Error::InvalidState("symbol set is full"));
        }
        if let Some(first) = self.symbols.first() {
            if symbol.dim() != first.dim() || symbol.ecl() != first.ecl() {
                return Err(Error::InvalidParameter(
                    "all symbols in a set must share dimension and error correction level",
                ));
            }
        }
        self.symbols.push(symbol);
        Ok(())
    }

    /// Freezes the set. Conversion requires a finalized, non-empty set.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.finalized {
            return Err(Error::InvalidState("symbol set is already finalized"));
        }
        if self.symbols.is_empty() {
            return Err(Error::InvalidState("finalize of an empty symbol set"));
        }
        self.finalized = true;
        Ok(())
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of symbols appended so far.
    pub fn num(&self) -> usize {
        self.symbols.len()
    }

    /// Declared maximum capacity.
    pub fn max(&self) -> usize {
        self.max
    }

    /// Shared side length of the member symbols.
    ///
    /// # Panics
    ///
    /// Panics if no symbol has been appended yet.
    pub fn dim(&self) -> usize {
        self.symbols[0].dim()
    }

    /// Shared error-correction level of the member symbols.
    ///
    /// # Panics
    ///
    /// Panics if no symbol has been appended yet.
    pub fn ecl(&self) -> EcLevel {
        self.symbols[0].ecl()
    }

    /// The `index`-th symbol of the sequence.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.num()`.
    pub fn get(&self, index: usize) -> &ModuleMatrix {
        &self.symbols[index]
    }

    pub fn symbols(&self) -> &[ModuleMatrix] {
        &self.symbols
    }

    pub(crate) fn require_finalized(&self) -> Result<(), Error> {
        if !self.finalized {
            return Err(Error::InvalidState("conversion of an unfinalized symbol set"));
        }
        Ok(())
    }
}
