//! The three doors of the game
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::N_DOORS;
use crate::result::{MontyError, Result};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;

/// One of the three doors, indexed 0, 1, and 2.
///
/// Doors are drawn uniformly through the `Standard` distribution:
///
/// ```
/// # use monty::door::Door;
/// use rand::Rng;
///
/// let mut rng = rand::thread_rng();
/// let door: Door = rng.gen();
/// assert!(door.index() < 3);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(into = "usize", try_from = "usize"))]
pub enum Door {
    Zero,
    One,
    Two,
}

impl Door {
    /// All doors in ascending index order
    pub const ALL: [Door; N_DOORS] = [Door::Zero, Door::One, Door::Two];

    /// The index of the door in {0, 1, 2}
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Door::Zero => 0,
            Door::One => 1,
            Door::Two => 2,
        }
    }

    /// Get the door at `ix`
    ///
    /// # Example
    ///
    /// ```
    /// # use monty::door::Door;
    /// assert_eq!(Door::from_index(2).unwrap(), Door::Two);
    /// assert!(Door::from_index(3).is_err());
    /// ```
    #[inline]
    pub fn from_index(ix: usize) -> Result<Self> {
        Door::ALL
            .get(ix)
            .copied()
            .ok_or(MontyError::InvalidDoor(ix))
    }

    /// The one door that is neither `a` nor `b`. `a` and `b` must differ.
    #[inline]
    pub(crate) fn third(a: Door, b: Door) -> Door {
        debug_assert_ne!(a, b);
        // indices of the three doors sum to 3
        Door::ALL[N_DOORS - a.index() - b.index()]
    }

    /// The lowest-index door other than `door`
    #[inline]
    pub(crate) fn lowest_other(door: Door) -> Door {
        match door {
            Door::Zero => Door::One,
            Door::One | Door::Two => Door::Zero,
        }
    }
}

impl From<Door> for usize {
    fn from(door: Door) -> usize {
        door.index()
    }
}

impl TryFrom<usize> for Door {
    type Error = MontyError;

    fn try_from(ix: usize) -> Result<Self> {
        Door::from_index(ix)
    }
}

impl Distribution<Door> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Door {
        Door::ALL[rng.gen_range(0..N_DOORS)]
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::misc::x2_test;
    use crate::test_basic_impls;

    const X2_PVAL: f64 = 0.2;
    const N_TRIES: usize = 5;

    test_basic_impls!(Door::One);

    #[test]
    fn index_round_trips_for_every_door() {
        for door in Door::ALL {
            assert_eq!(Door::from_index(door.index()).unwrap(), door);
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Door::from_index(3), Err(MontyError::InvalidDoor(3)));
        assert!(Door::try_from(usize::MAX).is_err());
    }

    #[test]
    fn third_is_the_remaining_door() {
        assert_eq!(Door::third(Door::One, Door::Two), Door::Zero);
        assert_eq!(Door::third(Door::Two, Door::Zero), Door::One);
        assert_eq!(Door::third(Door::Zero, Door::One), Door::Two);
    }

    #[test]
    fn lowest_other_skips_the_given_door() {
        assert_eq!(Door::lowest_other(Door::Zero), Door::One);
        assert_eq!(Door::lowest_other(Door::One), Door::Zero);
        assert_eq!(Door::lowest_other(Door::Two), Door::Zero);
    }

    #[test]
    fn display_is_index() {
        assert_eq!(format!("{}", Door::Two), "2");
    }

    #[test]
    fn draws_are_uniform() {
        let mut rng = rand::thread_rng();

        // test is flaky, try a few times
        let passes = (0..N_TRIES).fold(0, |acc, _| {
            let mut counts = [0_u64; N_DOORS];
            for _ in 0..3_000 {
                let door: Door = rng.gen();
                counts[door.index()] += 1;
            }
            let (_, p) = x2_test(&counts, &[1.0 / 3.0; N_DOORS]);
            if p > X2_PVAL {
                acc + 1
            } else {
                acc
            }
        });
        assert!(passes > 0);
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serializes_as_index() {
        let s = serde_json::to_string(&Door::Two).unwrap();
        assert_eq!(s, "2");
        let door: Door = serde_json::from_str("1").unwrap();
        assert_eq!(door, Door::One);
        assert!(serde_json::from_str::<Door>("7").is_err());
    }
}
