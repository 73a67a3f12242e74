//! Alignment of an observed snapshot against the requested check names.

use crate::domain::{AlignedResult, ObservedCheck};

/// Project `observed` onto `names`, one run per name, in name order.
///
/// Each name claims the first unclaimed run with the same name, in the
/// order the runs were listed. A claimed run is never handed to a later
/// name, so a name listed twice takes two distinct runs. Names with no
/// unclaimed run are skipped.
pub fn align(names: &[String], observed: &[ObservedCheck]) -> AlignedResult {
    let mut claimed = vec![false; observed.len()];
    let mut aligned = Vec::with_capacity(names.len());

    for name in names {
        let hit = (0..observed.len()).find(|&idx| !claimed[idx] && observed[idx].name == *name);
        if let Some(idx) = hit {
            claimed[idx] = true;
            aligned.push(observed[idx].clone());
        }
    }

    AlignedResult::new(aligned)
}
