use indexmap::IndexMap;
use rust_decimal::Decimal;

use super::amount::{round_cents, FULL_SHARE};
use super::error::AllocationError;

/// A partner's share in a partnership spec.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Share {
    /// An explicit percentage, 0 to 100.
    Percent(Decimal),
    /// No percentage given; implied by the other shares.
    Elided,
}

/// Ordered mapping of partner to share, attached to a transaction by a `Partnership:`
/// annotation:
///
/// ```text
/// 2017-01-06 (#4) MTA
///     ; Partnership: A 72.1, B
///     Assets:Cash:Checking                    $ 1000.00
///     Income:Salary
/// ```
///
/// Insertion order is significant: the last partner absorbs the rounding residual when a posting
/// is split.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartnershipSpec {
    shares: IndexMap<String, Share>,
}

impl PartnershipSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `partner`'s share.  A partner already present keeps its position.
    pub fn insert<S: Into<String>>(&mut self, partner: S, share: Share) {
        self.shares.insert(partner.into(), share);
    }

    /// Merges a later annotation into this one; same-named partners are overridden in place, new
    /// partners are appended.
    pub fn merge(&mut self, later: PartnershipSpec) {
        self.shares.extend(later.shares);
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn get(&self, partner: &str) -> Option<Share> {
        self.shares.get(partner).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Share)> {
        self.shares.iter().map(|(partner, share)| (partner.as_str(), *share))
    }

    pub fn elided_partners(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, share)| *share == Share::Elided)
            .map(|(partner, _)| partner)
            .collect()
    }

    /// When every share is elided and there are at least two partners, gives all but the last
    /// an equal percentage rounded to cents.  The last stays elided and receives the exact
    /// complement on resolution.
    pub fn with_equal_split(mut self) -> Self {
        let n = self.shares.len();
        if n > 1 && self.shares.values().all(|share| *share == Share::Elided) {
            let equal = round_cents(FULL_SHARE / Decimal::from(n));
            for share in self.shares.values_mut().take(n - 1) {
                *share = Share::Percent(equal);
            }
        }
        self
    }

    /// Fails if more than one share is elided.
    pub fn check_elision(&self) -> Result<(), AllocationError> {
        let elided = self.elided_partners();
        if elided.len() > 1 {
            return Err(AllocationError::AmbiguousPartnershipSpec {
                partners: elided.into_iter().map(String::from).collect(),
            });
        }
        Ok(())
    }

    /// Fills in the single elided share, if any, with the complement of the explicit shares.
    pub fn resolve(&self) -> Result<ResolvedSpec, AllocationError> {
        self.check_elision()?;
        let explicit: Decimal = self
            .shares
            .values()
            .filter_map(|share| match share {
                Share::Percent(p) => Some(*p),
                Share::Elided => None,
            })
            .sum();
        let shares = self
            .shares
            .iter()
            .map(|(partner, share)| {
                let percentage = match share {
                    Share::Percent(p) => *p,
                    Share::Elided => FULL_SHARE - explicit,
                };
                (partner.clone(), percentage)
            })
            .collect();
        Ok(ResolvedSpec { shares })
    }
}

impl<S: Into<String>> FromIterator<(S, Share)> for PartnershipSpec {
    fn from_iter<I: IntoIterator<Item = (S, Share)>>(iter: I) -> Self {
        let mut spec = PartnershipSpec::new();
        for (partner, share) in iter {
            spec.insert(partner, share);
        }
        spec
    }
}

/// A partnership spec with every percentage known, in partner order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResolvedSpec {
    shares: Vec<(String, Decimal)>,
}

impl ResolvedSpec {
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.shares.iter().map(|(partner, p)| (partner.as_str(), *p))
    }
}
