use std::str::FromStr;

use bitvec::{slice::BitSlice, vec::BitVec};

/// Module (one cell of the symbol grid) of a QR code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Module::Dark => write!(f, "dark"),
            Module::Light => write!(f, "light"),
        }
    }
}

impl TryFrom<char> for Module {
    type Error = char;

    /// Interpret a character of a text grid as a module.
    /// # Example
    /// ```
    /// use qrpix_core::Module;
    /// assert_eq!(Module::try_from('#'), Ok(Module::Dark));
    /// assert_eq!(Module::try_from('.'), Ok(Module::Light));
    /// assert_eq!(Module::try_from('?'), Err('?'));
    /// ```
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '#' | '1' | 'X' | 'x' | '█' => Ok(Module::Dark),
            '.' | '0' | '_' | ' ' => Ok(Module::Light),
            invalid => Err(invalid),
        }
    }
}

/// A square matrix of bits.
#[derive(Clone, PartialEq, Eq)]
struct BitMatrix {
    data: BitVec,
    size: usize,
}

impl BitMatrix {
    /// Return a matrix of size `size` filled with `value`.
    pub fn filled(size: usize, value: bool) -> Self {
        Self {
            data: BitVec::repeat(value, size * size),
            size,
        }
    }

    /// Get the size of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the 1D index of the data array corresponding to position `(i, j)`, checking for validity.
    #[inline]
    fn linearized_index(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.size && j < self.size {
            Some(self.size * i + j)
        } else {
            None
        }
    }

    /// Get the bit at position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        self.data
            .get(self.linearized_index(i, j)?)
            .map(|bit| (*bit))
    }

    /// Set the bit at position `(i, j)`.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: bool) {
        let index = self.linearized_index(i, j).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                self.size, i, j
            )
        });
        self.data.set(index, value)
    }

    /// Get a mutable reference to the `i`th row of the matrix.
    pub fn row_mut(&mut self, i: usize) -> Option<&mut BitSlice> {
        let range = self.linearized_index(i, 0)?..=self.linearized_index(i, self.size - 1)?;
        Some(&mut self.data[range])
    }

    /// Iterate over the positions of all the set bits, row by row.
    pub fn ones(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.data
            .iter_ones()
            .map(|index| (index / self.size, index % self.size))
    }
}

/// A square canvas of modules.
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    matrix: BitMatrix,
}

impl Canvas {
    /// Return a canvas of size `size` filled with `module`.
    #[inline]
    pub fn filled(size: usize, module: Module) -> Self {
        Self {
            matrix: BitMatrix::filled(size, module.into()),
        }
    }

    /// Get the size of the canvas.
    #[inline]
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Get the module at position `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Module> {
        self.matrix.get(i, j).map(Module::from)
    }

    /// Set the module at position `(i, j)`.
    /// # Panics
    /// Panics if position `(i, j)` is out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Module) {
        self.matrix.set(i, j, value.into())
    }

    /// Fill a rectangle with it upper-left corner at (`i`, `j`) of size `width` and `height` with
    /// `value`.
    /// # Panics
    /// Panics if any access is out of bounds.
    #[inline]
    pub fn fill(&mut self, value: Module, i: usize, j: usize, width: usize, height: usize) {
        let size = self.size();
        let value = value.into();
        let (jmin, jmax) = (j, j + width);
        for row in i..(i + height) {
            let row = self.matrix.row_mut(row).unwrap_or_else(|| {
                panic!(
                    "index out of bounds: the size is {} but the index is ({}, {})",
                    size, row, 0
                )
            });
            row[jmin..jmax].fill(value);
        }
    }

    /// Iterate over the `(i, j)` positions of the dark modules, row by row.
    /// # Example
    /// ```
    /// use qrpix_core::{Canvas, Module};
    /// let mut canvas = Canvas::filled(3, Module::Light);
    /// canvas.set(0, 2, Module::Dark);
    /// canvas.set(2, 1, Module::Dark);
    /// assert_eq!(canvas.dark_modules().collect::<Vec<_>>(), vec![(0, 2), (2, 1)]);
    /// ```
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix.ones()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.size() {
            for j in 0..self.size() {
                let c = match self.get(i, j) {
                    Some(Module::Dark) => '#',
                    _ => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasParseError {
    #[error("canvas is empty")]
    Empty,
    #[error("line {line} has {found} modules but the canvas is {expected} modules wide")]
    NotSquare {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid module {character:?} at line {line}, column {column}")]
    InvalidModule {
        character: char,
        line: usize,
        column: usize,
    },
}

impl FromStr for Canvas {
    type Err = CanvasParseError;

    /// Parse a text grid with one line per row of modules. Trailing empty lines are ignored.
    /// # Example
    /// ```
    /// use qrpix_core::{Canvas, Module};
    /// let canvas: Canvas = "#.\n.#\n".parse().unwrap();
    /// assert_eq!(canvas.size(), 2);
    /// assert_eq!(canvas.get(1, 1), Some(Module::Dark));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines: Vec<&str> = s.lines().collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        let size = lines.len();
        if size == 0 {
            return Err(CanvasParseError::Empty);
        }
        let mut canvas = Canvas::filled(size, Module::Light);
        for (i, line) in lines.into_iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(CanvasParseError::NotSquare {
                    line: i + 1,
                    expected: size,
                    found,
                });
            }
            for (j, c) in line.chars().enumerate() {
                let module =
                    Module::try_from(c).map_err(|character| CanvasParseError::InvalidModule {
                        character,
                        line: i + 1,
                        column: j + 1,
                    })?;
                canvas.set(i, j, module);
            }
        }
        Ok(canvas)
    }
}
