//! Linear-scan "closest body to a point" queries.
//!
//! One algorithm, three candidate domains (planets, systems, mazes).  Ties go
//! to the first candidate in iteration order; callers iterate in registration
//! order so results are reproducible.

use bevy::prelude::*;

/// Returns the candidate closest to `point`, or `None` for an empty sequence.
///
/// Uses a strict `<`, so among equidistant candidates the first one wins.
pub fn nearest_to<T, I>(point: Vec2, candidates: I) -> Option<T>
where
    I: IntoIterator<Item = (T, Vec2)>,
{
    let mut best: Option<(T, f32)> = None;
    for (candidate, pos) in candidates {
        let dst = point.distance(pos);
        let closer = best.as_ref().map_or(true, |(_, min_dst)| dst < *min_dst);
        if closer {
            best = Some((candidate, dst));
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Index form of [`nearest_to`] over a slice, using `pos` to read positions.
pub fn nearest_index<T>(point: Vec2, items: &[T], pos: impl Fn(&T) -> Vec2) -> Option<usize> {
    nearest_to(point, items.iter().enumerate().map(|(i, item)| (i, pos(item))))
}
