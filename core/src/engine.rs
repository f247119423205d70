use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a single game.
///
/// Only a loss is a terminal state; clearing every safe cell is not detected
/// and the game simply stays in progress.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    /// No mines placed yet.
    NotStarted,
    /// Mines placed, board still live.
    InProgress,
    /// A mined cell was revealed.
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Computes the discovered set after revealing `start`, expanding outward
/// through zero-adjacency regions with an explicit work queue.
///
/// `start` is always recorded, even when it is mined; deciding the loss is the
/// caller's job. Mined cells are never reached by expansion, so numbered cells
/// on the rim of a zero region are added as leaves and expansion stops there.
pub fn flood_reveal(minefield: &Minefield, start: Coord2, discovered: &PointSet) -> PointSet {
    let mut result = discovered.clone();
    result.insert(start);

    if minefield.contains_mine(start) {
        return result;
    }
    if minefield.mine_count() == 0 {
        // Placement has not resolved yet; expanding now would open the whole
        // board.
        log::debug!("Reveal at {:?} with no mines placed, not expanding", start);
        return result;
    }

    let mut to_visit = VecDeque::from([start]);
    while let Some(visit_coords) = to_visit.pop_front() {
        if !minefield.adjacency(visit_coords).is_expandable() {
            continue;
        }

        for pos in iter_neighbors(visit_coords, minefield.size()) {
            if minefield.contains_mine(pos) {
                continue;
            }
            if result.insert(pos) {
                log::trace!("Flood opened cell at {:?}", pos);
                to_visit.push_back(pos);
            }
        }
    }

    result
}

/// Tracks one configured game from first click to reset.
///
/// Mines are not placed until the first reveal, so the first-clicked cell can
/// be excluded from placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    board: Board,
    minefield: Option<Minefield>,
    discovered: PointSet,
    flags: PointSet,
    game_over: bool,
    seed: u64,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            board: Board::new(config.size),
            config,
            minefield: None,
            discovered: PointSet::new(),
            flags: PointSet::new(),
            game_over: false,
            seed,
        }
    }

    /// Starts directly from a known layout, skipping deferred placement.
    pub fn from_minefield(minefield: Minefield, seed: u64) -> Self {
        let config = minefield.game_config();
        Self {
            board: Board::new(config.size),
            config,
            minefield: Some(minefield),
            discovered: PointSet::new(),
            flags: PointSet::new(),
            game_over: false,
            seed,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield
            .as_ref()
            .map_or(self.config.mines, Minefield::mine_count)
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> GameState {
        if self.game_over {
            GameState::Lost
        } else if self.minefield.is_none() {
            GameState::NotStarted
        } else {
            GameState::InProgress
        }
    }

    pub fn discovered_count(&self) -> CellCount {
        self.discovered.len().try_into().unwrap()
    }

    /// Player-visible projection of the cell for rendering.
    ///
    /// A flag outranks a revealed count; unflagged mines only show after the
    /// game is lost.
    pub fn cell_view(&self, coords: Coord2) -> CellView {
        let mined = self
            .minefield
            .as_ref()
            .is_some_and(|minefield| minefield.contains_mine(coords));

        if self.game_over && mined && !self.flags.contains(&coords) {
            return CellView::Mine;
        }
        if self.flags.contains(&coords) {
            return CellView::Flagged;
        }
        if self.discovered.contains(&coords) {
            let count = match self.minefield.as_ref().map(|m| m.adjacency(coords)) {
                Some(Adjacency::Clear(count)) => count,
                Some(Adjacency::Mine) | None => 0,
            };
            return CellView::Revealed(count);
        }
        CellView::Hidden
    }

    /// Reveals a cell, placing mines first if this is the opening move.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_lost()?;

        let seed = self.seed;
        let mines = self.config.mines;
        let board = &self.board;
        let minefield = self.minefield.get_or_insert_with(|| {
            let generated = RandomMinefieldGenerator::new(seed, coords).generate(board, mines);
            log::debug!(
                "First reveal at {:?}, placed {} mines",
                coords,
                generated.mine_count()
            );
            generated
        });

        let before = self.discovered.len();
        let discovered = flood_reveal(minefield, coords, &self.discovered);
        let hit_mine = minefield.contains_mine(coords);
        self.discovered = discovered;

        if hit_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.game_over = true;
            return Ok(RevealOutcome::HitMine);
        }

        Ok(if self.discovered.len() > before {
            RevealOutcome::Revealed
        } else {
            RevealOutcome::NoChange
        })
    }

    /// Toggles a flag. Discovered cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_lost()?;

        if self.discovered.contains(&coords) {
            return Ok(MarkOutcome::NoChange);
        }

        if !self.flags.remove(&coords) {
            self.flags.insert(coords);
        }
        log::debug!("Flag toggled at {:?}", coords);
        Ok(MarkOutcome::Changed)
    }

    /// Clears all per-game state; the board itself persists.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("Reset, new seed {}", seed);
        self.minefield = None;
        self.discovered.clear();
        self.flags.clear();
        self.game_over = false;
        self.seed = seed;
    }

    /// Applies a new configuration. A dimension change regenerates the board
    /// and forces a full reset; a mines-only change applies from the next
    /// placement.
    pub fn set_config(&mut self, config: GameConfig, seed: u64) {
        if config.size != self.config.size {
            self.board = Board::new(config.size);
            self.config = config;
            self.reset(seed);
        } else {
            self.config = config;
        }
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.board.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_lost(&self) -> Result<()> {
        if self.game_over {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
