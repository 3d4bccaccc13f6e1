use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::Age;
use crate::grid::Grid;
use crate::parse_util;
use crate::parse_util::ConvertError;

/// Character marking a live cell in a grid file
pub const ALIVE: u8 = b'X';

/// Age given to every live cell of a grid file
pub const INITIAL_AGE: Age = 1;

#[derive(Debug, Error)]
pub enum GridFileError {
    #[error("Failed to read grid file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expected a row count, found end of input")]
    MissingRows,

    #[error("Expected a column count, found end of input")]
    MissingCols,

    #[error("Failed to parse row count: {0}")]
    InvalidRows(#[source] ConvertError),

    #[error("Failed to parse column count: {0}")]
    InvalidCols(#[source] ConvertError),

    #[error("Grid dimensions must be positive, found {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("A {rows}x{cols} grid is too large")]
    TooLarge { rows: usize, cols: usize },

    #[error("Expected {exp} rows, found {got}")]
    MissingRow { exp: usize, got: usize },

    #[error("Row {row} has {got} characters, expected at least {exp}")]
    ShortRow { row: usize, exp: usize, got: usize },
}

/// Read and parse the grid file at `path`.
pub fn load_grid<P: AsRef<Path>>(path: P) -> Result<Grid, GridFileError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let grid = read_grid(&bytes)?;
    info!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        "Loaded grid file"
    );

    Ok(grid)
}

/// Parse a grid file.
///
/// ```notrust
/// # any number of comment lines
/// 3
/// 5
/// XX...
/// ..X..
/// .....
/// ```
///
/// The first two lines after the comments are the row and column counts. Each of the `rows`
/// lines that follow must have at least `cols` characters, where `X` marks a live cell and
/// anything else a dead one. Characters past `cols`, and lines past `rows`, are ignored.
///
/// Columns are counted in bytes, so rows should be ASCII.
pub fn read_grid(mut bytes: &[u8]) -> Result<Grid, GridFileError> {
    // Skip as many comment lines as possible
    while parse_util::peek_1(bytes) == Some(b'#') {
        let (_, rest) = parse_util::take_line(bytes);
        bytes = rest;
    }

    let (Some(rows), bytes) = parse_util::take_line(bytes) else {
        return Err(GridFileError::MissingRows);
    };
    let rows: usize = parse_util::convert(rows).map_err(GridFileError::InvalidRows)?;

    let (Some(cols), mut bytes) = parse_util::take_line(bytes) else {
        return Err(GridFileError::MissingCols);
    };
    let cols: usize = parse_util::convert(cols).map_err(GridFileError::InvalidCols)?;

    if rows == 0 || cols == 0 {
        return Err(GridFileError::EmptyGrid { rows, cols });
    }

    let Some(len) = rows.checked_mul(cols) else {
        return Err(GridFileError::TooLarge { rows, cols });
    };

    let mut cells = Vec::with_capacity(len.min(bytes.len()));

    for row in 0..rows {
        let (Some(line), rest) = parse_util::take_line(bytes) else {
            return Err(GridFileError::MissingRow { exp: rows, got: row });
        };
        bytes = rest;

        let Some(line) = line.get(..cols) else {
            return Err(GridFileError::ShortRow {
                row,
                exp: cols,
                got: line.len(),
            });
        };

        cells.extend(line.iter().map(|&b| if b == ALIVE { INITIAL_AGE } else { 0 }));
    }

    Ok(Grid::from_parts(rows, cols, cells))
}

#[cfg(test)]
mod tests {
    use super::GridFileError;
    use super::read_grid;

    #[test]
    fn reads_ages() {
        let grid = read_grid(b"3\n5\nXX...\n..X..\n.....\n").unwrap();

        let ages: Vec<_> = grid.iter().map(|(_, _, age)| age).collect();
        assert_eq!(ages, vec![1, 1, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn skips_comments() {
        let grid = read_grid(b"# glider\n#\n2\n2\nX.\n.X").unwrap();

        assert_eq!(grid.get(0, 0), Ok(1));
        assert_eq!(grid.get(1, 1), Ok(1));
        assert_eq!(grid.alive_count(), 2);
    }

    #[test]
    fn ignores_extra_columns_and_rows() {
        let grid = read_grid(b"1\n2\n.XXXX\nXXXX\n").unwrap();

        assert_eq!((grid.rows(), grid.cols()), (1, 2));
        assert_eq!(grid.alive_count(), 1);
    }

    #[test]
    fn columns_are_bytes() {
        // 'é' takes up two columns
        let grid = read_grid("1\n3\néX\n".as_bytes()).unwrap();

        assert_eq!(grid.get(0, 2), Ok(1));
        assert_eq!(grid.alive_count(), 1);
    }

    #[test]
    fn malformed() {
        assert!(matches!(read_grid(b""), Err(GridFileError::MissingRows)));
        assert!(matches!(read_grid(b"# only\n"), Err(GridFileError::MissingRows)));
        assert!(matches!(read_grid(b"3\n"), Err(GridFileError::MissingCols)));
        assert!(matches!(
            read_grid(b"three\n3\n"),
            Err(GridFileError::InvalidRows(_))
        ));
        assert!(matches!(
            read_grid(b"1\n0\n\n"),
            Err(GridFileError::EmptyGrid { rows: 1, cols: 0 })
        ));
        assert!(matches!(
            read_grid(b"18446744073709551615\n2\nXX\n"),
            Err(GridFileError::TooLarge { cols: 2, .. })
        ));
        assert!(matches!(
            read_grid(b"100000\n100000\nXX\n"),
            Err(GridFileError::ShortRow {
                row: 0,
                exp: 100000,
                got: 2
            })
        ));
        assert!(matches!(
            read_grid(b"2\n3\nXXX\n"),
            Err(GridFileError::MissingRow { exp: 2, got: 1 })
        ));
        assert!(matches!(
            read_grid(b"2\n3\nXXX\nX\n"),
            Err(GridFileError::ShortRow {
                row: 1,
                exp: 3,
                got: 1
            })
        ));
    }
}
