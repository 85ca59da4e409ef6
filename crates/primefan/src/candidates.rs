/// The ordered candidate domain `{2} ∪ {3, 5, 7, ..., max_num}`.
///
/// Candidates are produced in increasing numeric order. The iterator is
/// fused by construction: the position only ever grows, so once the bound
/// is passed it never yields again.
#[derive(Debug)]
pub struct Candidates {
    next: u64,
    max_num: u64,
}

impl Candidates {
    /// Creates the candidate domain for an inclusive upper bound.
    ///
    /// A bound below 2 produces an empty domain.
    pub const fn new(max_num: u64) -> Self {
        Self { next: 2, max_num }
    }
}

impl Iterator for Candidates {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next > self.max_num {
            return None;
        }
        let candidate = self.next;
        // 2 is the only even member; every later step walks the odds.
        self.next = if candidate == 2 { 3 } else { candidate + 2 };
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::Candidates;

    #[test]
    fn starts_at_two_then_walks_odds() {
        let domain: Vec<u64> = Candidates::new(13).collect();
        assert_eq!(domain, vec![2, 3, 5, 7, 9, 11, 13]);
    }

    #[test]
    fn even_bound_stops_below_it() {
        let domain: Vec<u64> = Candidates::new(10).collect();
        assert_eq!(domain, vec![2, 3, 5, 7, 9]);
    }

    #[test]
    fn bound_of_two_yields_only_two() {
        let domain: Vec<u64> = Candidates::new(2).collect();
        assert_eq!(domain, vec![2]);
    }

    #[test]
    fn bound_below_two_is_empty() {
        assert_eq!(Candidates::new(1).count(), 0);
        assert_eq!(Candidates::new(0).count(), 0);
    }

    #[test]
    fn stays_empty_after_exhaustion() {
        let mut domain = Candidates::new(3);
        assert_eq!(domain.next(), Some(2));
        assert_eq!(domain.next(), Some(3));
        for _ in 0..4 {
            assert_eq!(domain.next(), None);
        }
    }
}
