//! Binary colorings of the class set and the search for
//! the best-separating partition.
use fixedbitset::FixedBitSet;
use rand::prelude::*;


/// Exhaustive search is used up to this many classes;
/// beyond it the randomized strategy takes over by default.
pub const EXHAUSTIVE_LIMIT: usize = 12;

const DEFAULT_RANDOM_CANDIDATES: usize = 4096;


/// A mapping from class index to one of two colors, `-1` or `+1`.
///
/// A coloring and its sign-complement describe the same partition
/// of the class set, so the search space has `2^(C-1)` distinct
/// members; the enumeration pins class `0` to `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coloring {
    // Set bit means color +1.
    bits: FixedBitSet,
    n_class: usize,
}


impl Coloring {
    /// The coloring assigning `-1` to every class.
    pub(crate) fn all_minus(n_class: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(n_class),
            n_class,
        }
    }


    /// Number of classes this coloring covers.
    pub fn n_class(&self) -> usize {
        self.n_class
    }


    /// The color assigned to `class`, either `-1.0` or `+1.0`.
    pub fn color(&self, class: usize) -> f64 {
        if self.bits.contains(class) { 1.0 } else { -1.0 }
    }


    /// Whether `a` and `b` receive opposite colors.
    pub fn splits(&self, a: usize, b: usize) -> bool {
        self.bits.contains(a) != self.bits.contains(b)
    }


    /// The sign-complement: every color flipped.
    /// Describes the same partition as `self`.
    pub fn complement(&self) -> Self {
        let mut bits = self.bits.clone();
        bits.toggle_range(..self.n_class);
        Self { bits, n_class: self.n_class }
    }


    /// Advance to the next coloring of the canonical half:
    /// class `0` stays `-1`, classes `1..` count like a binary
    /// number. Returns `false` once every combination was visited.
    fn increment(&mut self) -> bool {
        for k in (1..self.n_class).rev() {
            if self.bits.contains(k) {
                self.bits.set(k, false);
            } else {
                self.bits.set(k, true);
                return true;
            }
        }
        false
    }


    /// The coloring separating class `0` from all other classes.
    fn zero_vs_rest(n_class: usize) -> Self {
        let mut coloring = Self::all_minus(n_class);
        coloring.bits.set_range(1..n_class, true);
        coloring
    }


    /// A coloring with classes `1..` colored uniformly at random,
    /// class `0` pinned to `-1`.
    fn random<R: Rng>(n_class: usize, rng: &mut R) -> Self {
        let mut coloring = Self::all_minus(n_class);
        for k in 1..n_class {
            coloring.bits.set(k, rng.gen::<bool>());
        }
        coloring
    }
}


/// How [`AdaBoostOC`](crate::AdaBoostOC) searches the partition
/// space for each member's coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringStrategy {
    /// Exhaustive up to [`EXHAUSTIVE_LIMIT`] classes,
    /// randomized beyond.
    Auto,

    /// Score every one of the `2^(C-1)` distinct partitions.
    /// The cost doubles with every additional class.
    Exhaustive,

    /// Score the given number of random candidate colorings and
    /// keep the best; a modest number does well in practice.
    Randomized {
        /// Number of random candidates per member.
        n_candidates: usize,
    },
}


impl ColoringStrategy {
    pub(crate) fn resolve(self, n_class: usize) -> Self {
        match self {
            Self::Auto if n_class <= EXHAUSTIVE_LIMIT => Self::Exhaustive,
            Self::Auto => Self::Randomized {
                n_candidates: DEFAULT_RANDOM_CANDIDATES,
            },
            other => other,
        }
    }
}


/// Scores every one of the `2^(C-1)` distinct partitions with
/// `crit` and returns the best coloring and its score.
/// Ties keep the earliest coloring in enumeration order.
pub fn exhaustive_search<F>(n_class: usize, mut crit: F) -> (Coloring, f64)
    where F: FnMut(&Coloring) -> f64,
{
    assert!(n_class >= 2);

    let mut coloring = Coloring::all_minus(n_class);
    let mut best_coloring = coloring.clone();
    let mut best = crit(&coloring);

    while coloring.increment() {
        let score = crit(&coloring);
        if score > best {
            best = score;
            best_coloring = coloring.clone();
        }
    }

    (best_coloring, best)
}


/// Scores `n_candidates` random colorings drawn from the canonical
/// half of the partition space and returns the best one.
/// The class-0-vs-rest split is always scored first,
/// so the winner separates at least one pair of classes
/// even when every random draw lands on the all-`-1` coloring.
pub fn randomized_search<F>(
    n_class: usize,
    n_candidates: usize,
    seed: u64,
    mut crit: F,
) -> (Coloring, f64)
    where F: FnMut(&Coloring) -> f64,
{
    assert!(n_class >= 2);
    assert!(n_candidates > 0);

    let mut rng = StdRng::seed_from_u64(seed);

    let mut best_coloring = Coloring::zero_vs_rest(n_class);
    let mut best = crit(&best_coloring);

    for _ in 0..n_candidates {
        let coloring = Coloring::random(n_class, &mut rng);
        let score = crit(&coloring);
        if score > best {
            best = score;
            best_coloring = coloring;
        }
    }

    (best_coloring, best)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_canonical_half_exactly_once() {
        for n_class in 2..=6 {
            let mut seen = Vec::new();
            let (_, _) = exhaustive_search(n_class, |coloring| {
                assert_eq!(coloring.color(0), -1.0);
                seen.push(coloring.clone());
                0.0
            });

            assert_eq!(seen.len(), 1 << (n_class - 1));
            for (i, a) in seen.iter().enumerate() {
                for b in &seen[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn complement_preserves_partition() {
        let mut coloring = Coloring::all_minus(4);
        coloring.increment();
        coloring.increment();

        let complement = coloring.complement();
        for a in 0..4 {
            for b in 0..4 {
                assert_eq!(coloring.splits(a, b), complement.splits(a, b));
            }
        }
    }

    #[test]
    fn randomized_search_never_picks_a_degenerate_coloring() {
        // With a single candidate over two classes, half the seeds
        // draw the all-(-1) coloring; the fallback must still win.
        let crit = |coloring: &Coloring| {
            if coloring.splits(0, 1) { 1.0 } else { 0.0 }
        };
        for seed in 0..64 {
            let (best, score) = randomized_search(2, 1, seed, crit);
            assert!(best.splits(0, 1));
            assert_eq!(score, 1.0);
        }
    }

    #[test]
    fn randomized_search_is_reproducible() {
        let crit = |coloring: &Coloring| {
            (0..coloring.n_class())
                .map(|c| coloring.color(c))
                .sum::<f64>()
        };
        let first = randomized_search(15, 64, 7, crit);
        let second = randomized_search(15, 64, 7, crit);
        assert_eq!(first, second);
    }
}
