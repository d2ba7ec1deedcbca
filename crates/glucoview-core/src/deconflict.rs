//! Treatment deconfliction
//!
//! Doses recorded a few minutes apart draw as one blurred marker. A single
//! left-to-right pass looks at adjacent pairs: when the gap is within the
//! threshold, the earlier dose moves back and the later one forward by half
//! the threshold each. An adjusted pair is not revisited; the scan resumes
//! with the pair after it.
//!
//! A pair is only moved when neither member would cross its outer
//! neighbour, so the output is always sorted. Chains of three or more close
//! doses can therefore stay partly un-nudged.

use crate::config::DeconflictPolicy;
use crate::types::InsulinTreatment;

/// Return `treatments` sorted by time with close pairs pushed apart.
/// Length and relative order are preserved.
pub fn deconflict(treatments: &[InsulinTreatment], policy: &DeconflictPolicy) -> Vec<InsulinTreatment> {
    let mut adjusted = treatments.to_vec();
    adjusted.sort_by_key(|t| t.timestamp);

    let shift = policy.shift();
    let mut i = 0;
    while i + 1 < adjusted.len() {
        let gap = adjusted[i + 1].timestamp - adjusted[i].timestamp;
        if gap > policy.threshold {
            i += 1;
            continue;
        }

        let earlier = adjusted[i].timestamp - shift;
        let later = adjusted[i + 1].timestamp + shift;
        let clear_before = i == 0 || adjusted[i - 1].timestamp <= earlier;
        let clear_after = adjusted.get(i + 2).map_or(true, |next| later <= next.timestamp);

        if !(clear_before && clear_after) {
            tracing::debug!(
                first = adjusted[i].id,
                second = adjusted[i + 1].id,
                "close doses left in place, shifting would reorder neighbours"
            );
            i += 1;
            continue;
        }

        tracing::debug!(
            first = adjusted[i].id,
            second = adjusted[i + 1].id,
            gap_secs = gap.num_seconds(),
            "separating close doses"
        );
        adjusted[i].timestamp = earlier;
        adjusted[i + 1].timestamp = later;
        i += 2;
    }

    adjusted
}
