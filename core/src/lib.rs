use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Size floors at 1×1; the mine count is capped so the first-clicked cell
    /// can always stay clear.
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let mines = mines.min(mult(rows, cols).saturating_sub(1));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new((20, 20), 50)
    }
}

/// Row-major enumeration of every point on a `rows × cols` grid.
///
/// Regenerated whenever dimensions change, immutable in between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord2,
    points: Vec<Coord2>,
}

impl Board {
    pub fn new(size: Coord2) -> Self {
        let (rows, cols) = size;
        let mut points = Vec::with_capacity(usize::from(mult(rows, cols)));
        for row in 0..rows {
            for col in 0..cols {
                points.push((row, col));
            }
        }
        Self { size, points }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn points(&self) -> &[Coord2] {
        &self.points
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.size.0 && col < self.size.1
    }
}

/// Result of counting mines around a point.
///
/// Tagged so "the point itself is mined" can never be confused with a true
/// neighbor count of one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjacency {
    Mine,
    Clear(u8),
}

impl Adjacency {
    /// Whether flood reveal may expand through this point.
    pub const fn is_expandable(self) -> bool {
        matches!(self, Self::Clear(0))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    size: Coord2,
    mines: PointSet,
}

impl Minefield {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = PointSet::with_capacity(mine_coords.len());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines.insert(coords);
        }
        Ok(Self { size, mines })
    }

    pub(crate) fn from_parts(size: Coord2, mines: PointSet) -> Self {
        Self { size, mines }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size,
            mines: self.mine_count(),
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mines.contains(&coords)
    }

    pub fn adjacency(&self, coords: Coord2) -> Adjacency {
        if self.contains_mine(coords) {
            return Adjacency::Mine;
        }
        let count = iter_neighbors(coords, self.size)
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap();
        Adjacency::Clear(count)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_is_row_major_and_unique() {
        let board = Board::new((3, 4));
        assert_eq!(board.total_cells(), 12);
        assert_eq!(board.points().len(), 12);
        assert_eq!(board.points()[0], (0, 0));
        assert_eq!(board.points()[3], (0, 3));
        assert_eq!(board.points()[4], (1, 0));
        assert_eq!(board.points()[11], (2, 3));

        let unique: PointSet = board.points().iter().copied().collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn board_bounds_check() {
        let board = Board::new((2, 5));
        assert!(board.contains((1, 4)));
        assert!(!board.contains((2, 0)));
        assert!(!board.contains((0, 5)));
    }

    #[test]
    fn config_clamps_degenerate_values() {
        let config = GameConfig::new((0, 0), 10);
        assert_eq!(config.size, (1, 1));
        assert_eq!(config.mines, 0);

        let config = GameConfig::new((3, 3), 100);
        assert_eq!(config.mines, 8);
    }

    #[test]
    fn adjacency_distinguishes_mine_from_single_neighbor() {
        let minefield = Minefield::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        assert_eq!(minefield.adjacency((1, 1)), Adjacency::Mine);
        assert_eq!(minefield.adjacency((0, 0)), Adjacency::Clear(1));
        assert_ne!(minefield.adjacency((1, 1)), Adjacency::Clear(1));
    }

    #[test]
    fn adjacency_counts_all_neighbors() {
        let mines: Vec<Coord2> = neighbors((1, 1), (3, 3)).into_iter().collect();
        let minefield = Minefield::from_mine_coords((3, 3), &mines).unwrap();
        assert_eq!(minefield.adjacency((1, 1)), Adjacency::Clear(8));
    }

    #[test]
    fn minefield_rejects_out_of_bounds_mines() {
        let result = Minefield::from_mine_coords((2, 2), &[(2, 0)]);
        assert_eq!(result.unwrap_err(), GameError::InvalidCoords);
    }
}
