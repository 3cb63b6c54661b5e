use crate::model::{Person, ShiftLabel};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Départage des quasi-égalités : graine reproductible ou plus petit id.
pub(super) enum TieBreaker {
    LowestId,
    Seeded(ChaCha8Rng),
}

impl TieBreaker {
    pub(super) fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => TieBreaker::Seeded(ChaCha8Rng::seed_from_u64(seed)),
            None => TieBreaker::LowestId,
        }
    }

    /// Clé secondaire par personne (même indice que `people`), tirée pour la journée.
    pub(super) fn keys(&mut self, people: &[Person]) -> Vec<u64> {
        match self {
            TieBreaker::LowestId => people.iter().map(|p| u64::from(p.id.get())).collect(),
            TieBreaker::Seeded(rng) => people.iter().map(|_| rng.gen::<u64>()).collect(),
        }
    }

    pub(super) fn label_order(&mut self) -> [ShiftLabel; 3] {
        let mut order = ShiftLabel::WORK;
        if let TieBreaker::Seeded(rng) = self {
            order.shuffle(rng);
        }
        order
    }
}
