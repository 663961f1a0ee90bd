//! Content-mix allocation: percentage weights to exact integer counts.

use std::collections::HashMap;

use postcraft_core::ContentType;

use crate::error::EngineError;

/// Per-content-type post counts, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    entries: Vec<(ContentType, usize)>,
}

impl Allocation {
    #[must_use]
    pub fn get(&self, content_type: ContentType) -> usize {
        self.entries
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map_or(0, |(_, count)| *count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContentType, usize)> + '_ {
        self.entries.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `batch_size` posts across `content_types` according to `content_mix`.
///
/// With a mix, each requested type with a non-zero weight gets
/// `max(1, floor(batch_size * pct / 100))`. Without one (or when no requested
/// type carries weight), the batch is split evenly. Shortfall goes to the
/// first entry; excess comes off the largest entry, ties going to the one seen
/// first, never taking an entry below one until every entry is at one.
/// Entries that end at zero are dropped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfiguration`] if `content_types` is empty
/// or `batch_size` is zero.
pub fn allocate(
    content_mix: &HashMap<ContentType, u32>,
    batch_size: usize,
    content_types: &[ContentType],
) -> Result<Allocation, EngineError> {
    if batch_size == 0 {
        return Err(EngineError::InvalidConfiguration(
            "batch size must be at least 1".to_string(),
        ));
    }

    let mut requested: Vec<ContentType> = Vec::with_capacity(content_types.len());
    for ct in content_types {
        if !requested.contains(ct) {
            requested.push(*ct);
        }
    }
    if requested.is_empty() {
        return Err(EngineError::InvalidConfiguration(
            "at least one content type is required".to_string(),
        ));
    }

    let mut entries: Vec<(ContentType, usize)> = requested
        .iter()
        .filter_map(|ct| {
            content_mix
                .get(ct)
                .copied()
                .filter(|pct| *pct > 0)
                .map(|pct| (*ct, (batch_size * pct as usize / 100).max(1)))
        })
        .collect();

    if entries.is_empty() {
        let per_type = (batch_size / requested.len()).max(1);
        entries = requested.iter().map(|ct| (*ct, per_type)).collect();
    }

    reconcile(&mut entries, batch_size);
    entries.retain(|(_, count)| *count > 0);

    Ok(Allocation { entries })
}

fn reconcile(entries: &mut [(ContentType, usize)], batch_size: usize) {
    let total: usize = entries.iter().map(|(_, count)| count).sum();

    if total < batch_size {
        entries[0].1 += batch_size - total;
        return;
    }

    let mut excess = total - batch_size;
    while excess > 0 {
        let mut largest = 0;
        for (idx, (_, count)) in entries.iter().enumerate() {
            if *count > entries[largest].1 {
                largest = idx;
            }
        }
        // Keep every entry at one while any entry can still give.
        let count = entries[largest].1;
        let take = if count > 1 { excess.min(count - 1) } else { 1 };
        entries[largest].1 -= take;
        excess -= take;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ContentType::{Educational, Entertaining, Inspirational, Promotional};

    fn mix(pairs: &[(ContentType, u32)]) -> HashMap<ContentType, u32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn weighted_mix_without_remainder() {
        let a = allocate(
            &mix(&[(Educational, 60), (Promotional, 40)]),
            5,
            &[Educational, Promotional],
        )
        .unwrap();
        assert_eq!(a.get(Educational), 3);
        assert_eq!(a.get(Promotional), 2);
        assert_eq!(a.total(), 5);
    }

    #[test]
    fn empty_mix_splits_evenly() {
        let a = allocate(&HashMap::new(), 6, &[Educational, Promotional, Entertaining]).unwrap();
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![(Educational, 2), (Promotional, 2), (Entertaining, 2)]
        );
    }

    #[test]
    fn shortfall_goes_to_first_type() {
        // 7 / 3 = 2 each, one left over.
        let a = allocate(&HashMap::new(), 7, &[Educational, Promotional, Entertaining]).unwrap();
        assert_eq!(a.get(Educational), 3);
        assert_eq!(a.get(Promotional), 2);
        assert_eq!(a.get(Entertaining), 2);
    }

    #[test]
    fn excess_comes_off_largest_type() {
        // 80% + 50% of 10 = 8 + 5 = 13, three too many.
        let a = allocate(
            &mix(&[(Educational, 50), (Promotional, 80)]),
            10,
            &[Educational, Promotional],
        )
        .unwrap();
        assert_eq!(a.get(Educational), 5);
        assert_eq!(a.get(Promotional), 5);
    }

    #[test]
    fn excess_tie_prefers_first_seen() {
        // 60% + 60% of 5 = 3 + 3, one too many; both tie at 3.
        let a = allocate(
            &mix(&[(Educational, 60), (Promotional, 60)]),
            5,
            &[Educational, Promotional],
        )
        .unwrap();
        assert_eq!(a.get(Educational), 2);
        assert_eq!(a.get(Promotional), 3);
    }

    #[test]
    fn heavy_overweight_keeps_every_type() {
        // 100% each of 3 = 3 + 3 + 3, six too many.
        let a = allocate(
            &mix(&[(Educational, 100), (Promotional, 100), (Entertaining, 100)]),
            3,
            &[Educational, Promotional, Entertaining],
        )
        .unwrap();
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![(Educational, 1), (Promotional, 1), (Entertaining, 1)]
        );
    }

    #[test]
    fn small_batch_drops_zero_count_types() {
        let a = allocate(
            &HashMap::new(),
            2,
            &[Educational, Promotional, Entertaining, Inspirational],
        )
        .unwrap();
        assert_eq!(a.total(), 2);
        assert!(a.len() < 4);
        assert!(a.iter().all(|(_, count)| count > 0));
    }

    #[test]
    fn types_missing_from_mix_are_excluded() {
        let a = allocate(
            &mix(&[(Educational, 100)]),
            4,
            &[Educational, Promotional],
        )
        .unwrap();
        assert_eq!(a.get(Educational), 4);
        assert_eq!(a.get(Promotional), 0);
    }

    #[test]
    fn zero_weight_is_treated_as_absent() {
        let a = allocate(
            &mix(&[(Educational, 100), (Promotional, 0)]),
            3,
            &[Educational, Promotional],
        )
        .unwrap();
        assert_eq!(a.get(Promotional), 0);
        assert_eq!(a.total(), 3);
    }

    #[test]
    fn mix_without_requested_types_falls_back_to_even_split() {
        let a = allocate(&mix(&[(Inspirational, 100)]), 4, &[Educational, Promotional]).unwrap();
        assert_eq!(a.get(Educational), 2);
        assert_eq!(a.get(Promotional), 2);
    }

    #[test]
    fn duplicate_types_are_collapsed() {
        let a = allocate(&HashMap::new(), 4, &[Educational, Educational, Promotional]).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn empty_content_types_is_invalid() {
        let err = allocate(&HashMap::new(), 5, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn zero_batch_is_invalid() {
        let err = allocate(&HashMap::new(), 0, &[Educational]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }

    #[test]
    fn total_always_matches_batch_size() {
        let type_sets: [&[ContentType]; 3] = [
            &[Educational],
            &[Educational, Promotional],
            &[Educational, Promotional, Entertaining, Inspirational],
        ];
        let mixes = [
            HashMap::new(),
            mix(&[(Educational, 60), (Promotional, 40)]),
            mix(&[(Educational, 100), (Promotional, 100), (Entertaining, 100)]),
            mix(&[(Educational, 1), (Inspirational, 7)]),
            mix(&[(Promotional, 33), (Entertaining, 33), (Inspirational, 33)]),
        ];
        for types in type_sets {
            for m in &mixes {
                for batch_size in 1..=25 {
                    let a = allocate(m, batch_size, types).unwrap();
                    assert_eq!(
                        a.total(),
                        batch_size,
                        "types={types:?} mix={m:?} batch={batch_size}"
                    );
                    if batch_size >= types.len() {
                        for ct in types.iter() {
                            let weighted = m.get(ct).is_some_and(|p| *p > 0);
                            let none_weighted = !types.iter().any(|t| m.get(t).is_some_and(|p| *p > 0));
                            if weighted || none_weighted {
                                assert!(
                                    a.get(*ct) >= 1,
                                    "{ct} starved: types={types:?} mix={m:?} batch={batch_size}"
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}
