use super::*;

/// Uniform placement over a shuffled copy of the board, keeping the starting
/// cell clear.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, board: &Board, mines: CellCount) -> Minefield {
        use rand::prelude::*;

        let capacity = board.total_cells().saturating_sub(1);
        if mines > capacity {
            log::warn!(
                "Requested {} mines but only {} fit outside the start cell",
                mines,
                capacity
            );
        }
        let mines = mines.min(capacity);

        let mut points = board.points().to_vec();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        points.shuffle(&mut rng);
        points.retain(|&pos| pos != self.start);
        points.truncate(usize::from(mines));

        log::debug!("Placed {} mines, start cell {:?} kept clear", points.len(), self.start);
        Minefield::from_parts(board.size(), points.into_iter().collect())
    }
}
