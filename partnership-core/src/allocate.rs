use rust_decimal::Decimal;

use super::amount::percent_of;
use super::error::AllocationError;
use super::posting::{Posting, VirtualPosting};
use super::spec::ResolvedSpec;

/// Splits `posting` among the partners of `spec`, in partner order.
///
/// Every partner but the last receives its percentage of the value rounded to cents; the last
/// receives whatever remains, so the shares always sum to the posting's value exactly.  Shares
/// which round to zero are included; callers rendering a journal drop them.
pub fn allocate<'a>(
    posting: &Posting<'a>,
    spec: &ResolvedSpec,
) -> Result<Vec<VirtualPosting<'a>>, AllocationError> {
    let overflow = || AllocationError::ValueOverflow { line: posting.line };
    let mut shares = Vec::with_capacity(spec.len());
    let mut allocated = Decimal::ZERO;
    let last = spec.len().saturating_sub(1);

    for (i, (partner, percentage)) in spec.iter().enumerate() {
        let value = if i == last {
            posting.value.checked_sub(allocated)
        } else {
            percent_of(percentage, posting.value)
        }
        .ok_or_else(overflow)?;
        allocated = allocated.checked_add(value).ok_or_else(overflow)?;
        shares.push(
            VirtualPosting::builder()
                .account(posting.account.clone())
                .partner(partner)
                .value(value)
                .build(),
        );
    }

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{PartnershipSpec, Share};
    use rust_decimal_macros::dec;

    fn posting(value: Decimal) -> Posting<'static> {
        Posting::builder()
            .account("Assets:Cash:Checking")
            .value(value)
            .build()
    }

    fn resolved(shares: &[(&str, Option<Decimal>)]) -> ResolvedSpec {
        shares
            .iter()
            .map(|(partner, p)| (*partner, p.map(Share::Percent).unwrap_or(Share::Elided)))
            .collect::<PartnershipSpec>()
            .with_equal_split()
            .resolve()
            .unwrap()
    }

    fn values(shares: &[VirtualPosting<'_>]) -> Vec<Decimal> {
        shares.iter().map(|s| s.value).collect()
    }

    #[test]
    fn no_partners() {
        assert!(allocate(&posting(dec!(1000.00)), &ResolvedSpec::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn single_partner_takes_everything() {
        let shares = allocate(&posting(dec!(1000.00)), &resolved(&[("A", None)])).unwrap();
        assert_eq!(values(&shares), vec![dec!(1000.00)]);
        assert_eq!(shares[0].partner_account().name(), "A:Assets:Cash:Checking");
    }

    #[test]
    fn equal_split() {
        let shares =
            allocate(&posting(dec!(1000.00)), &resolved(&[("A", None), ("B", None)])).unwrap();
        assert_eq!(values(&shares), vec![dec!(500.00), dec!(500.00)]);
    }

    #[test]
    fn last_partner_takes_complement() {
        let shares = allocate(
            &posting(dec!(1000.00)),
            &resolved(&[("A", Some(dec!(72.1))), ("B", None)]),
        )
        .unwrap();
        assert_eq!(values(&shares), vec![dec!(721.00), dec!(279.00)]);
    }

    #[test]
    fn last_partner_absorbs_rounding() {
        let shares = allocate(
            &posting(dec!(100.00)),
            &resolved(&[("A", None), ("B", None), ("C", None)]),
        )
        .unwrap();
        assert_eq!(values(&shares), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);

        let shares = allocate(
            &posting(dec!(-0.05)),
            &resolved(&[("A", None), ("B", None)]),
        )
        .unwrap();
        assert_eq!(values(&shares), vec![dec!(-0.02), dec!(-0.03)]);
    }

    #[test]
    fn zero_shares_are_kept() {
        let shares = allocate(
            &posting(dec!(0.01)),
            &resolved(&[("A", Some(dec!(10))), ("B", Some(dec!(90)))]),
        )
        .unwrap();
        assert_eq!(values(&shares), vec![dec!(0.00), dec!(0.01)]);
    }

    #[test]
    fn overflowing_split() {
        let huge = Posting::builder()
            .account("Assets:Vault")
            .value(Decimal::MAX)
            .line(7)
            .build();
        let err = allocate(
            &huge,
            &resolved(&[("A", Some(dec!(100))), ("B", Some(dec!(100))), ("C", None)]),
        )
        .unwrap_err();
        assert_eq!(err, AllocationError::ValueOverflow { line: 7 });
    }

    #[test]
    fn shares_always_sum_to_value() {
        let specs = [
            resolved(&[("A", Some(dec!(12.5))), ("B", Some(dec!(37.5))), ("C", None)]),
            resolved(&[("A", None), ("B", None), ("C", None), ("D", None), ("E", None), ("F", None), ("G", None)]),
            resolved(&[("A", Some(dec!(0.01))), ("B", Some(dec!(99.99)))]),
            resolved(&[("A", Some(dec!(66.667))), ("B", None)]),
        ];
        let values_to_split = [
            dec!(0.01),
            dec!(0.07),
            dec!(-1.00),
            dec!(33.33),
            dec!(1234.57),
            dec!(-98765.43),
            dec!(1000000.01),
        ];
        for spec in &specs {
            for value in &values_to_split {
                let shares = allocate(&posting(*value), spec).unwrap();
                assert_eq!(shares.len(), spec.len());
                let total: Decimal = shares.iter().map(|s| s.value).sum();
                assert_eq!(total, *value, "split of {} by {:?}", value, spec);
            }
        }
    }
}
