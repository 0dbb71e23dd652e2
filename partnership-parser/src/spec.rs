use std::str::FromStr;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser as PestParser;
use rust_decimal::Decimal;

use partnership_core::amount::FULL_SHARE;
use partnership_core::{PartnershipSpec, Share};

use super::classify::Tag;
use super::error::{ParseError, ParseResult};

#[derive(PestParser)]
#[grammar = "partnership.pest"]
pub struct SpecParser;

/// What a single annotation contributes to its transaction.
#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    /// `None`: the transaction is not split.
    Disabled,
    Spec(PartnershipSpec),
}

/// Parses the text following the tag of an annotation.
///
/// With [`Tag::Partnership`], a spec naming two or more partners and no percentages is split
/// equally.  In every case at most one partner may lack a percentage.
///
/// Errors carry no line number; the caller supplies it.
pub fn parse_spec(text: &str, tag: Tag) -> ParseResult<Annotation> {
    let parsed = SpecParser::parse(Rule::spec, text)
        .map_err(|e| ParseError::spec_grammar_error(e, text))?
        .next()
        .ok_or_else(|| ParseError::malformed_spec(text, "empty parse result"))?;

    let mut spec = PartnershipSpec::new();
    for pair in parsed.into_inner() {
        match pair.as_rule() {
            Rule::disabled => return Ok(Annotation::Disabled),
            Rule::share_list => {
                for share_pair in pair.into_inner() {
                    let (partner, share) = share(share_pair, text)?;
                    spec.insert(partner, share);
                }
            }
            _ => {}
        }
    }

    if tag.equal_split() {
        spec = spec.with_equal_split();
    }
    spec.check_elision()
        .map_err(|e| ParseError::from_allocation(e, 0))?;
    Ok(Annotation::Spec(spec))
}

fn share<'i>(pair: Pair<'i, Rule>, text: &str) -> ParseResult<(&'i str, Share)> {
    debug_assert!(pair.as_rule() == Rule::share);
    let mut inner = pair.into_inner();
    let partner = inner
        .next()
        .ok_or_else(|| ParseError::malformed_spec(text, "missing partner name"))?
        .as_str();
    let share = match inner.next() {
        Some(p) => Share::Percent(percentage(p.as_str(), text)?),
        None => Share::Elided,
    };
    Ok((partner, share))
}

fn percentage(s: &str, text: &str) -> ParseResult<Decimal> {
    let p = Decimal::from_str(s).map_err(|e| ParseError::decimal_spec_error(e, text))?;
    if p > FULL_SHARE {
        return Err(ParseError::malformed_spec(
            text,
            format!("percentage {} exceeds 100", s),
        ));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use rust_decimal_macros::dec;

    macro_rules! parse_ok {
        ( $rule:ident, $input:expr ) => {
            assert_eq!(SpecParser::parse(Rule::$rule, $input).unwrap().as_str(), $input);
        };
        ( $rule:ident, $input:expr, $output:expr ) => {
            assert_eq!(SpecParser::parse(Rule::$rule, $input).unwrap().as_str(), $output);
        };
    }

    macro_rules! parse_fail {
        ( $rule:ident, $input:expr ) => {
            assert!(SpecParser::parse(Rule::$rule, $input).is_err());
        };
    }

    fn shares(text: &str, tag: Tag) -> Vec<(String, Share)> {
        match parse_spec(text, tag).unwrap() {
            Annotation::Spec(spec) => spec
                .iter()
                .map(|(partner, share)| (partner.to_string(), share))
                .collect(),
            Annotation::Disabled => panic!("{} parsed as disabled", text),
        }
    }

    fn kind(text: &str) -> ParseErrorKind {
        parse_spec(text, Tag::Partnership).unwrap_err().kind
    }

    #[test]
    fn percentage_rule() {
        parse_ok!(percentage, "50");
        parse_ok!(percentage, "72.1");
        parse_ok!(percentage, "33.");
        parse_ok!(percentage, ".5");
        parse_ok!(percentage, "12.5%", "12.5");

        parse_fail!(percentage, "-5");
        parse_fail!(percentage, "x");
    }

    #[test]
    fn partner_rule() {
        parse_ok!(partner, "Partner1");
        parse_ok!(partner, "O'Brien");
        parse_ok!(partner, "A B", "A");
        parse_ok!(partner, "A,B", "A");

        parse_fail!(partner, ",A");
        parse_fail!(partner, " A");
    }

    #[test]
    fn spec_rule() {
        parse_ok!(spec, "None");
        parse_ok!(spec, "A");
        parse_ok!(spec, "A, B");
        parse_ok!(spec, "A 72.1, B");
        parse_ok!(spec, "A\t50 ,B 50");

        parse_fail!(spec, "");
        parse_fail!(spec, "A,");
        parse_fail!(spec, "A,,B");
        parse_fail!(spec, "A 50 extra");
        parse_fail!(spec, "A fifty");
    }

    #[test]
    fn disabled() {
        assert_eq!(parse_spec("None", Tag::Partnership).unwrap(), Annotation::Disabled);
        assert_eq!(
            shares("Nonesuch", Tag::Partnership),
            vec![("Nonesuch".to_string(), Share::Elided)]
        );
        assert_eq!(
            shares("None, A", Tag::Partnership),
            vec![
                ("None".to_string(), Share::Percent(dec!(50))),
                ("A".to_string(), Share::Elided)
            ]
        );
    }

    #[test]
    fn single_partner() {
        assert_eq!(
            shares("Partner1", Tag::Partnership),
            vec![("Partner1".to_string(), Share::Elided)]
        );
    }

    #[test]
    fn equal_split() {
        assert_eq!(
            shares("A, B, C", Tag::Partnership),
            vec![
                ("A".to_string(), Share::Percent(dec!(33.33))),
                ("B".to_string(), Share::Percent(dec!(33.33))),
                ("C".to_string(), Share::Elided),
            ]
        );
    }

    #[test]
    fn explicit_and_elided() {
        assert_eq!(
            shares("A 72.1, B", Tag::Partnership),
            vec![
                ("A".to_string(), Share::Percent(dec!(72.1))),
                ("B".to_string(), Share::Elided),
            ]
        );
        assert_eq!(
            shares("A, B 25", Tag::Shadow),
            vec![
                ("A".to_string(), Share::Elided),
                ("B".to_string(), Share::Percent(dec!(25))),
            ]
        );
    }

    #[test]
    fn ambiguous() {
        assert_eq!(
            kind("A 20, B, C"),
            ParseErrorKind::AmbiguousPartnershipSpec {
                partners: vec!["B".to_string(), "C".to_string()]
            }
        );
        assert_eq!(
            parse_spec("A, B", Tag::Shadow).unwrap_err().kind,
            ParseErrorKind::AmbiguousPartnershipSpec {
                partners: vec!["A".to_string(), "B".to_string()]
            }
        );
    }

    #[test]
    fn malformed() {
        for text in &["", "A,", "A 50 extra", "A fifty", "A 100.01"] {
            match kind(text) {
                ParseErrorKind::MalformedSpec { text: t, .. } => assert_eq!(t, *text),
                other => panic!("{:?} for {}", other, text),
            }
        }
    }
}
