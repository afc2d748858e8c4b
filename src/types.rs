//! Core value types shared by every stage.

/// Number of slots in a showdown lineup: one captain plus five flex players.
pub const LINEUP_SIZE: usize = 6;

/// Index of the captain slot within a [`Lineup`].
pub const CAPTAIN_SLOT: usize = 0;

/// One candidate lineup: six slate row ids, captain first.
///
/// Lineups are value objects. Stages never mutate a lineup in place;
/// crossover and mutation produce fresh ones.
///
/// The captain's projection and salary are both scaled by the configured
/// captain multiplier, so the same player pool serves every slot and no
/// duplicate "captain edition" rows are needed in the slate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lineup(pub [usize; LINEUP_SIZE]);

impl Lineup {
    /// Returns the six slate row ids, captain first.
    pub fn slots(&self) -> &[usize; LINEUP_SIZE] {
        &self.0
    }

    /// Returns the captain's slate row id.
    pub fn captain(&self) -> usize {
        self.0[CAPTAIN_SLOT]
    }

    /// Returns `true` when all six ids are pairwise distinct.
    pub fn is_unique(&self) -> bool {
        let mut ids = self.0;
        ids.sort_unstable();
        ids.windows(2).all(|w| w[0] != w[1])
    }
}

impl From<[usize; LINEUP_SIZE]> for Lineup {
    fn from(slots: [usize; LINEUP_SIZE]) -> Self {
        Lineup(slots)
    }
}

/// The current generation's collection of lineups.
pub type Population = Vec<Lineup>;

/// Per-lineup fitness, index-aligned with the population it was scored from.
///
/// A fitness vector is replaced wholesale whenever its population is; stale
/// vectors are never reused against a newer population.
pub type FitnessVec = Vec<f64>;
