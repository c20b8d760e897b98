use crate::core::chem::blocks::CoefficientRange;

/// Lazily yields every coefficient tuple in the cartesian product of a set of
/// inclusive integer ranges, in lexicographic order.
///
/// The iterator is generic in the number of ranges, so adding a building block
/// to the table never touches the enumeration control flow. Tuples are
/// ephemeral: each `next()` allocates the yielded vector and nothing else is
/// retained between steps.
pub struct CoefficientGrid {
    ranges: Vec<CoefficientRange>,
    current: Vec<u32>,
    exhausted: bool,
}

impl CoefficientGrid {
    pub fn new(ranges: &[CoefficientRange]) -> Self {
        Self {
            ranges: ranges.to_vec(),
            current: ranges.iter().map(|r| r.min).collect(),
            exhausted: false,
        }
    }
}

impl Iterator for CoefficientGrid {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();

        // Odometer increment, least-significant position last.
        let mut pos = self.ranges.len();
        loop {
            if pos == 0 {
                self.exhausted = true;
                break;
            }
            pos -= 1;
            if self.current[pos] < self.ranges[pos].max {
                self.current[pos] += 1;
                for (later, range) in self.current[pos + 1..].iter_mut().zip(&self.ranges[pos + 1..])
                {
                    *later = range.min;
                }
                break;
            }
        }

        Some(item)
    }
}

/// Number of tuples the grid over `ranges` will yield. Saturates rather than
/// overflowing for absurdly wide user tables.
pub fn candidate_count(ranges: &[CoefficientRange]) -> u64 {
    ranges
        .iter()
        .fold(1u64, |acc, range| acc.saturating_mul(range.span()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u32, max: u32) -> CoefficientRange {
        CoefficientRange::new(min, max)
    }

    #[test]
    fn grid_yields_the_full_product_in_lexicographic_order() {
        let tuples: Vec<Vec<u32>> = CoefficientGrid::new(&[range(0, 1), range(0, 2)]).collect();
        assert_eq!(
            tuples,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn grid_respects_non_zero_minimums() {
        let tuples: Vec<Vec<u32>> = CoefficientGrid::new(&[range(2, 3), range(1, 1)]).collect();
        assert_eq!(tuples, vec![vec![2, 1], vec![3, 1]]);
    }

    #[test]
    fn grid_over_no_ranges_yields_a_single_empty_tuple() {
        let tuples: Vec<Vec<u32>> = CoefficientGrid::new(&[]).collect();
        assert_eq!(tuples, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn grid_length_matches_candidate_count() {
        let ranges = [range(0, 2), range(1, 4), range(0, 0)];
        let count = CoefficientGrid::new(&ranges).count() as u64;
        assert_eq!(count, candidate_count(&ranges));
        assert_eq!(count, 12);
    }

    #[test]
    fn candidate_count_saturates_instead_of_overflowing() {
        let ranges = vec![range(0, u32::MAX); 4];
        assert_eq!(candidate_count(&ranges), u64::MAX);
    }

    #[test]
    fn every_tuple_is_yielded_exactly_once() {
        let ranges = [range(0, 3), range(0, 3)];
        let tuples: Vec<Vec<u32>> = CoefficientGrid::new(&ranges).collect();
        let mut deduped = tuples.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(tuples.len(), deduped.len());
        assert_eq!(tuples.len(), 16);
    }
}
