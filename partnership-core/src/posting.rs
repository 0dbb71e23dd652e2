use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use super::account::Account;

/// A posting as written in the journal.  The value may be elided, in which case it is implied by
/// the balance of the other postings in the same transaction:
///
/// ```text
/// 2017-01-06 (#1) MTA
///     Assets:Cash:Checking                    $ 1000.00
///     Income:Salary
/// ```
///
/// A real posting carries no reference to the partnership spec; the spec is owned by the
/// enclosing [`Transaction`](crate::Transaction) and applied to every posting when the
/// transaction is finalized.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct RealPosting<'a> {
    /// Account being posted to.
    #[builder(setter(into))]
    pub account: Account<'a>,

    /// The explicit value, if any.
    #[builder(default)]
    pub value: Option<Decimal>,

    /// Line number of the posting in its source, counting from 1.
    #[builder(default)]
    pub line: usize,
}

/// A posting whose value is known.
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Posting<'a> {
    #[builder(setter(into))]
    pub account: Account<'a>,

    pub value: Decimal,

    #[builder(default)]
    pub line: usize,
}

/// One partner's share of a real posting.  Never written by hand; rendered as a virtual
/// (unbalanced) Ledger posting:
///
/// ```text
///     [A:Assets:Cash:Checking]  $ 721.00
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct VirtualPosting<'a> {
    /// Account of the real posting this share was split from.
    #[builder(setter(into))]
    pub account: Account<'a>,

    #[builder(setter(into))]
    pub partner: String,

    pub value: Decimal,
}

impl VirtualPosting<'_> {
    /// The partner-qualified account, e.g. `A:Assets:Cash:Checking`.
    pub fn partner_account(&self) -> Account<'static> {
        self.account.for_partner(&self.partner)
    }
}
