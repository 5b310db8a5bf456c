//! Picks the verbs a quiz is played over.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{QuizMode, VerbRecord};

/// Default number of questions per quiz.
pub const DEFAULT_QUIZ_SIZE: usize = 10;

/// Sample `count` records without replacement.
///
/// Shuffles a copy of the whole pool uniformly and takes the prefix, so the
/// result has `min(count, pool.len())` distinct records and no bias toward
/// insertion order.
pub fn select<R: Rng + ?Sized>(pool: &[VerbRecord], count: usize, rng: &mut R) -> Vec<VerbRecord> {
    let mut drawn = pool.to_vec();
    drawn.shuffle(rng);
    drawn.truncate(count);
    drawn
}

/// Like [`select`], restricted to the records `mode` admits.
pub fn select_for_mode<R: Rng + ?Sized>(
    pool: &[VerbRecord],
    mode: QuizMode,
    count: usize,
    rng: &mut R,
) -> Vec<VerbRecord> {
    let admitted: Vec<VerbRecord> = pool.iter().filter(|v| mode.admits(v)).cloned().collect();
    select(&admitted, count, rng)
}
