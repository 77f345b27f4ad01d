//! Trials of the game and their generation
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{BATCH_SIZE, N_DOORS};
use crate::door::Door;
use crate::result::{MontyError, Result};
use rand::distributions::Standard;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A single game: where the car is and which door the contestant picked
/// first.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Trial {
    pub prize: Door,
    pub pick: Door,
}

impl Trial {
    #[inline]
    pub fn new(prize: Door, pick: Door) -> Self {
        Trial { prize, pick }
    }

    /// The goat door opened by the host.
    ///
    /// The host never opens the picked door or the prize door. When the
    /// contestant picked the prize both remaining doors hide goats and the
    /// lowest-index one is opened.
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::door::Door;
    /// # use monty::trial::Trial;
    /// let trial = Trial::new(Door::Two, Door::Zero);
    /// assert_eq!(trial.revealed(), Door::One);
    ///
    /// let trial = Trial::new(Door::Two, Door::Two);
    /// assert_eq!(trial.revealed(), Door::Zero);
    /// ```
    #[inline]
    pub fn revealed(&self) -> Door {
        if self.prize == self.pick {
            Door::lowest_other(self.pick)
        } else {
            Door::third(self.prize, self.pick)
        }
    }

    /// The door held after switching away from the initial pick: the only
    /// door that is neither picked nor revealed.
    #[inline]
    pub fn switched(&self) -> Door {
        Door::third(self.pick, self.revealed())
    }
}

impl fmt::Display for Trial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prize: {}, pick: {}, revealed: {}, switched: {}",
            self.prize,
            self.pick,
            self.revealed(),
            self.switched()
        )
    }
}

/// An ordered set of independent trials
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct TrialSet {
    trials: Vec<Trial>,
}

impl TrialSet {
    /// Draw `n` trials from `rng`.
    ///
    /// The prize column is drawn first, followed by the pick column, so the
    /// two columns are independent uniform sequences over the doors.
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::trial::TrialSet;
    /// let mut rng = rand::thread_rng();
    /// let trials = TrialSet::generate(100, &mut rng);
    /// assert_eq!(trials.len(), 100);
    /// ```
    pub fn generate<R: Rng>(n: usize, rng: &mut R) -> Self {
        let prize: Vec<Door> =
            (&mut *rng).sample_iter(Standard).take(n).collect();
        let pick: Vec<Door> =
            (&mut *rng).sample_iter(Standard).take(n).collect();

        let trials = prize
            .into_iter()
            .zip(pick)
            .map(|(prize, pick)| Trial::new(prize, pick))
            .collect();

        tracing::debug!(n, "generated trial set");
        TrialSet { trials }
    }

    /// Draw `n` trials reproducibly from `seed`.
    ///
    /// Trials are drawn in batches of `BATCH_SIZE`, each batch from its own
    /// non-overlapping xoshiro256++ stream, so the result depends only on
    /// `n` and `seed`. With the `parallel` feature batches are drawn on the
    /// rayon thread pool.
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::trial::TrialSet;
    /// let a = TrialSet::from_seed(1_000, 1337);
    /// let b = TrialSet::from_seed(1_000, 1337);
    /// assert_eq!(a, b);
    /// ```
    pub fn from_seed(n: usize, seed: u64) -> Self {
        let streams = batch_streams(n, seed);

        #[cfg(feature = "parallel")]
        let batches = streams.into_par_iter();
        #[cfg(not(feature = "parallel"))]
        let batches = streams.into_iter();

        let parts: Vec<TrialSet> = batches
            .map(|(len, mut rng)| {
                tracing::trace!(len, "drawing batch");
                TrialSet::generate(len, &mut rng)
            })
            .collect();

        let trials = parts.into_iter().flat_map(|part| part.trials).collect();

        tracing::debug!(n, seed, "generated seeded trial set");
        TrialSet { trials }
    }

    /// Build a trial set from explicit prize and pick columns
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::door::Door;
    /// # use monty::trial::TrialSet;
    /// let trials = TrialSet::from_columns(
    ///     &[Door::Zero, Door::One],
    ///     &[Door::Zero, Door::Zero],
    /// ).unwrap();
    /// assert_eq!(trials.len(), 2);
    ///
    /// assert!(TrialSet::from_columns(&[Door::Zero], &[]).is_err());
    /// ```
    pub fn from_columns(prize: &[Door], pick: &[Door]) -> Result<Self> {
        if prize.len() != pick.len() {
            return Err(MontyError::ColumnLengthMismatch {
                prize: prize.len(),
                pick: pick.len(),
            });
        }

        let trials = prize
            .iter()
            .zip(pick.iter())
            .map(|(&prize, &pick)| Trial::new(prize, pick))
            .collect();

        Ok(TrialSet { trials })
    }

    /// Build a trial set from door indices
    pub fn from_indices(prize: &[usize], pick: &[usize]) -> Result<Self> {
        let prize = to_doors(prize)?;
        let pick = to_doors(pick)?;
        TrialSet::from_columns(&prize, &pick)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    #[inline]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trial> {
        self.trials.iter()
    }

    /// The prize door of every trial
    pub fn prize_doors(&self) -> Vec<Door> {
        self.iter().map(|trial| trial.prize).collect()
    }

    /// The initial pick of every trial
    pub fn initial_picks(&self) -> Vec<Door> {
        self.iter().map(|trial| trial.pick).collect()
    }

    /// The door opened by the host in every trial
    pub fn revealed_doors(&self) -> Vec<Door> {
        self.iter().map(Trial::revealed).collect()
    }

    /// The door held after switching in every trial
    pub fn switched_picks(&self) -> Vec<Door> {
        self.iter().map(Trial::switched).collect()
    }

    /// Per-door tallies of the prize and pick columns, in that order
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::trial::TrialSet;
    /// let trials = TrialSet::from_indices(&[0, 1, 2], &[0, 0, 0]).unwrap();
    /// let (prize, pick) = trials.door_counts();
    /// assert_eq!(prize, [1, 1, 1]);
    /// assert_eq!(pick, [3, 0, 0]);
    /// ```
    pub fn door_counts(&self) -> ([u64; N_DOORS], [u64; N_DOORS]) {
        self.iter().fold(
            ([0; N_DOORS], [0; N_DOORS]),
            |(mut prize, mut pick), trial| {
                prize[trial.prize.index()] += 1;
                pick[trial.pick.index()] += 1;
                (prize, pick)
            },
        )
    }
}

impl<'a> IntoIterator for &'a TrialSet {
    type Item = &'a Trial;
    type IntoIter = std::slice::Iter<'a, Trial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}

impl FromIterator<Trial> for TrialSet {
    fn from_iter<I: IntoIterator<Item = Trial>>(iter: I) -> Self {
        TrialSet {
            trials: iter.into_iter().collect(),
        }
    }
}

fn to_doors(ixs: &[usize]) -> Result<Vec<Door>> {
    ixs.iter().map(|&ix| Door::from_index(ix)).collect()
}

/// Split `n` trials into batches, pairing each batch length with its own
/// RNG. Each stream starts 2^128 draws after the previous one.
fn batch_streams(n: usize, seed: u64) -> Vec<(usize, Xoshiro256PlusPlus)> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut remaining = n;
    let mut streams = Vec::with_capacity(n / BATCH_SIZE + 1);

    while remaining > 0 {
        let len = remaining.min(BATCH_SIZE);
        streams.push((len, rng.clone()));
        rng.jump();
        remaining -= len;
    }

    streams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::x2_test;
    use crate::test_basic_impls;
    use proptest::prelude::*;

    const X2_PVAL: f64 = 0.2;
    const N_TRIES: usize = 5;

    test_basic_impls!(TrialSet::from_seed(10, 0));

    fn all_trials() -> Vec<Trial> {
        Door::ALL
            .iter()
            .flat_map(|&prize| {
                Door::ALL.iter().map(move |&pick| Trial::new(prize, pick))
            })
            .collect()
    }

    fn assert_partition(trial: &Trial) {
        let mut doors = vec![
            trial.pick.index(),
            trial.revealed().index(),
            trial.switched().index(),
        ];
        doors.sort_unstable();
        assert_eq!(doors, vec![0, 1, 2], "{}", trial);
        assert_ne!(trial.revealed(), trial.prize, "{}", trial);
    }

    #[test]
    fn pick_revealed_and_switched_partition_the_doors() {
        let trials = all_trials();
        assert_eq!(trials.len(), 9);
        trials.iter().for_each(assert_partition);
    }

    #[test]
    fn switching_wins_iff_first_pick_missed() {
        for trial in all_trials() {
            assert_eq!(trial.switched() == trial.prize, trial.pick != trial.prize);
        }
    }

    #[test]
    fn host_reveals_lowest_goat_when_pick_is_prize() {
        let trials = TrialSet::from_indices(&[0, 1, 2], &[0, 1, 2]).unwrap();
        let revealed: Vec<usize> =
            trials.revealed_doors().into_iter().map(usize::from).collect();
        let switched: Vec<usize> =
            trials.switched_picks().into_iter().map(usize::from).collect();
        assert_eq!(revealed, vec![1, 0, 0]);
        assert_eq!(switched, vec![2, 2, 1]);
    }

    #[test]
    fn switched_picks_for_fixed_pick() {
        let trials = TrialSet::from_indices(&[0, 1, 2], &[0, 0, 0]).unwrap();
        let switched = trials.switched_picks();
        assert_eq!(switched, vec![Door::Two, Door::One, Door::Two]);
        assert!(switched.iter().all(|&d| d != Door::Zero));
    }

    #[test]
    fn generate_zero_is_empty() {
        let mut rng = rand::thread_rng();
        let trials = TrialSet::generate(0, &mut rng);
        assert!(trials.is_empty());
        assert!(TrialSet::from_seed(0, 7).is_empty());
    }

    #[test]
    fn from_seed_spans_multiple_batches() {
        let n = 2 * BATCH_SIZE + 17;
        let trials = TrialSet::from_seed(n, 42);
        assert_eq!(trials.len(), n);
        assert_eq!(trials, TrialSet::from_seed(n, 42));
        assert_ne!(trials, TrialSet::from_seed(n, 43));
    }

    #[test]
    fn from_seed_matches_sequential_batches() {
        // batches drawn one after another, in stream order, on this thread
        let n = 3 * BATCH_SIZE + 5;
        let expected: TrialSet = batch_streams(n, 5)
            .into_iter()
            .flat_map(|(len, mut rng)| TrialSet::generate(len, &mut rng).trials)
            .collect();
        assert_eq!(TrialSet::from_seed(n, 5), expected);
    }

    #[test]
    fn door_counts_tally_in_u64() {
        let trials = TrialSet::from_seed(1_000, 3);
        let (prize, pick): ([u64; N_DOORS], [u64; N_DOORS]) =
            trials.door_counts();
        assert_eq!(prize.iter().sum::<u64>(), 1_000);
        assert_eq!(pick.iter().sum::<u64>(), 1_000);
    }

    #[test]
    fn first_batch_draws_from_the_seeded_rng() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let expected = TrialSet::generate(8, &mut rng);
        assert_eq!(TrialSet::from_seed(8, 1), expected);
    }

    #[test]
    fn batch_streams_cover_n() {
        let streams = batch_streams(BATCH_SIZE + 1, 0);
        let lens: Vec<usize> = streams.iter().map(|(len, _)| *len).collect();
        assert_eq!(lens, vec![BATCH_SIZE, 1]);
    }

    #[test]
    fn from_columns_rejects_length_mismatch() {
        let err = TrialSet::from_columns(&[Door::Zero, Door::One], &[Door::One])
            .unwrap_err();
        assert_eq!(err, MontyError::ColumnLengthMismatch { prize: 2, pick: 1 });
    }

    #[test]
    fn from_indices_rejects_bad_door() {
        let err = TrialSet::from_indices(&[0, 3], &[0, 1]).unwrap_err();
        assert_eq!(err, MontyError::InvalidDoor(3));
    }

    #[test]
    fn generated_columns_are_uniform() {
        let mut rng = rand::thread_rng();
        let ps = [1.0 / 3.0; N_DOORS];

        // test is flaky, try a few times
        let passes = (0..N_TRIES).fold(0, |acc, _| {
            let (prize, pick) = TrialSet::generate(3_000, &mut rng).door_counts();
            let (_, p_prize) = x2_test(&prize, &ps);
            let (_, p_pick) = x2_test(&pick, &ps);
            if p_prize > X2_PVAL && p_pick > X2_PVAL {
                acc + 1
            } else {
                acc
            }
        });
        assert!(passes > 0);
    }

    fn door() -> impl Strategy<Value = Door> {
        (0..N_DOORS).prop_map(|ix| Door::ALL[ix])
    }

    proptest! {
        #[test]
        fn switch_resolution_partitions_doors(prize in door(), pick in door()) {
            let trial = Trial::new(prize, pick);
            prop_assert_ne!(trial.switched(), trial.pick);
            prop_assert_ne!(trial.switched(), trial.revealed());
            prop_assert_ne!(trial.revealed(), trial.pick);
            prop_assert_ne!(trial.revealed(), trial.prize);
        }

        #[test]
        fn seeded_sets_are_reproducible(n in 0..5_000_usize, seed in any::<u64>()) {
            let trials = TrialSet::from_seed(n, seed);
            prop_assert_eq!(trials.len(), n);
            prop_assert_eq!(trials, TrialSet::from_seed(n, seed));
        }
    }
}
