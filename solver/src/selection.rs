use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Rank-selection policy of the merge loop.
///
/// Greedy always takes the top-ranked edge; this is the mode required
/// wherever repeated runs must be deterministic (re-planning). The
/// biased-randomized mode samples a rank from a geometric-like distribution
/// concentrated near rank 0, which diversifies repeated runs while staying
/// quasi-greedy. The random source is owned by the policy so tests and
/// parallel runs seed it explicitly.
pub enum Selection {
    Greedy,
    BiasedRandomized {
        rng: SmallRng,
        beta_min: f64,
        beta_max: f64,
    },
}

// static functions
impl Selection {
    pub fn greedy() -> Selection {
        Selection::Greedy
    }

    pub fn biased(seed: u64, beta_min: f64, beta_max: f64) -> Selection {
        assert!(0.0 < beta_min && beta_min <= beta_max && beta_max < 1.0);
        Selection::BiasedRandomized {
            rng: SmallRng::seed_from_u64(seed),
            beta_min,
            beta_max,
        }
    }
}

// methods
impl Selection {
    /// pick a rank in 0..size. Greedy returns 0; the biased mode draws beta
    /// uniformly from [beta_min, beta_max], then a geometric-like index
    /// floor(ln(u) / ln(1 - beta)) mod size for uniform u in (0, 1].
    pub fn pick_position(&mut self, size: usize) -> usize {
        assert!(size > 0, "cannot pick from an empty list");
        match self {
            Selection::Greedy => 0,
            Selection::BiasedRandomized {
                rng,
                beta_min,
                beta_max,
            } => {
                let beta = *beta_min + rng.gen::<f64>() * (*beta_max - *beta_min);
                // 1 - gen() lies in (0, 1], keeping ln finite; u = 1 maps to rank 0
                let u = 1.0 - rng.gen::<f64>();
                let index = (u.ln() / (1.0 - beta).ln()).floor() as usize;
                index % size
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;

    #[test]
    fn greedy_always_picks_the_top_rank_test() {
        let mut selection = Selection::greedy();
        for size in [1, 2, 100] {
            assert_eq!(selection.pick_position(size), 0);
        }
    }

    #[test]
    fn biased_positions_are_within_bounds_test() {
        let mut selection = Selection::biased(42, 0.1, 0.3);
        for _ in 0..1000 {
            assert!(selection.pick_position(17) < 17);
        }
    }

    #[test]
    fn biased_is_reproducible_for_equal_seeds_test() {
        let mut first = Selection::biased(7, 0.1, 0.3);
        let mut second = Selection::biased(7, 0.1, 0.3);
        let picks_first: Vec<_> = (0..50).map(|_| first.pick_position(23)).collect();
        let picks_second: Vec<_> = (0..50).map(|_| second.pick_position(23)).collect();
        assert_eq!(picks_first, picks_second);
    }

    #[test]
    fn biased_concentrates_on_top_ranks_test() {
        // with beta in [0.1, 0.3] rank 0 is drawn with probability of
        // roughly beta, far more often than a uniform 1/size
        let mut selection = Selection::biased(123, 0.1, 0.3);
        let draws = 10_000;
        let top_rank_hits = (0..draws)
            .filter(|_| selection.pick_position(100) == 0)
            .count();
        assert!(top_rank_hits > draws / 10);
    }
}
