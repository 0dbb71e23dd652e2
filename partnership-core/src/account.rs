use std::borrow::Cow;
use std::fmt;

/// Represents an account.
///
/// Ledger accumulates values in accounts.  An account name is a colon-separated hierarchy of
/// segments, which may contain words, hyphens, commas, apostrophes, parentheses and single
/// embedded spaces.
///
/// Some example accounts:
///
/// ```text
/// Assets:Cash:Checking
/// Liabilities:Visa
/// Expenses:Food and Drink
/// Income:Salary
/// (Assets:Reserve)
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Account<'a> {
    name: Cow<'a, str>,
}

impl<'a> Account<'a> {
    pub fn new<S: Into<Cow<'a, str>>>(name: S) -> Self {
        Account { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The account under which `partner`'s share of this account is recorded, without the
    /// virtual-posting brackets.
    ///
    /// ```
    /// # use partnership_core::Account;
    /// let account = Account::new("Assets:Cash:Checking");
    /// assert_eq!(account.for_partner("A").name(), "A:Assets:Cash:Checking");
    /// ```
    pub fn for_partner(&self, partner: &str) -> Account<'static> {
        Account::new(format!("{}:{}", partner, self.name))
    }
}

impl<'a> From<&'a str> for Account<'a> {
    fn from(s: &'a str) -> Self {
        Account::new(s)
    }
}

impl From<String> for Account<'_> {
    fn from(s: String) -> Self {
        Account::new(s)
    }
}

impl fmt::Display for Account<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_partner() {
        let account = Account::from("Income:Salary");
        assert_eq!(account.for_partner("Partner1").to_string(), "Partner1:Income:Salary");
    }
}
