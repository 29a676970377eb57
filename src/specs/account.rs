// src/specs/account.rs
//
// The oldest account pages: plain two-column tables instead of labelled divs.
//   accountManagement.do  table 0 = personal details, table 1 = card details
//   cardValue.do          table 0 = product | value | autoload, one header row
// Any row that does not fit fails the whole page.

use std::collections::BTreeMap;

use scraper::Html;

use crate::config::consts::{LEGACY_AUTOLOAD_NONE, SERIAL_LABEL, STATUS_LABEL, TYPE_LABEL};
use crate::core::html::{extract_table_rows, find_all, Anchor};
use crate::core::sanitize::{digits_only, strip_label_colon};
use crate::data::{Account, Card, CardFeature, CardProduct};
use crate::error::Result;

pub fn parse_account(page: &str) -> Result<Account> {
    let doc = Html::parse_document(page);
    let tables = find_all(doc.root_element(), &Anchor::tag("table"));
    let [details, card_table, ..] = tables.as_slice() else {
        return Err(content_err!("personal details and card tables, found {} tables", tables.len()));
    };

    let mut personal_details = BTreeMap::new();
    for row in extract_table_rows(*details, 0, 2)? {
        let label = strip_label_colon(&row[0]);
        if !label.is_empty() {
            personal_details.insert(label, row[1].clone());
        }
    }

    let pairs: Vec<(String, String)> = extract_table_rows(*card_table, 0, 2)?
        .into_iter()
        .filter(|row| !row[0].is_empty())
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect();

    Ok(Account { personal_details, cards: legacy_cards(&pairs)? })
}

/// A new card starts at every serial number label.
fn legacy_cards(pairs: &[(String, String)]) -> Result<Vec<Card>> {
    let mut groups: Vec<Vec<&(String, String)>> = Vec::new();
    for pair in pairs {
        if pair.0 == SERIAL_LABEL || groups.is_empty() {
            groups.push(Vec::new());
        }
        if let Some(g) = groups.last_mut() { g.push(pair); }
    }

    groups
        .into_iter()
        .map(|group| {
            let field = |label: &str| {
                group
                    .iter()
                    .find(|(l, _)| l == label)
                    .map(|(_, v)| v.clone())
                    .ok_or_else(|| content_err!("{label:?} row in card table"))
            };
            let serial_number = digits_only(&field(SERIAL_LABEL)?);
            if serial_number.is_empty() {
                return Err(content_err!("digits in {SERIAL_LABEL:?} row"));
            }
            Ok(Card {
                nickname: serial_number.clone(),
                serial_number,
                kind: field(TYPE_LABEL)?,
                status: field(STATUS_LABEL)?,
                products: Vec::new(),
                features: Vec::new(),
            })
        })
        .collect()
}

/// Products of one card, plus an autoload feature for every product that has one.
pub fn parse_card_balance(page: &str) -> Result<(Vec<CardProduct>, Vec<CardFeature>)> {
    let doc = Html::parse_document(page);
    let table = find_all(doc.root_element(), &Anchor::tag("table"))
        .into_iter()
        .next()
        .ok_or_else(|| content_err!("balance table"))?;

    let mut products = Vec::new();
    let mut features = Vec::new();
    for row in extract_table_rows(table, 1, 3)? {
        let [product, value, autoload] = <[String; 3]>::try_from(row)
            .map_err(|_| content_err!("3 cells in balance row"))?;
        if autoload != LEGACY_AUTOLOAD_NONE && !autoload.is_empty() {
            features.push(CardFeature::new(product.clone(), autoload));
        }
        products.push(CardProduct { name: product, value });
    }
    Ok((products, features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn two_cards_in_one_table() {
        let page = r#"
            <table><tr><td>Cardholder:</td><td>Jane  Doe</td></tr><tr><td></td><td>ignored</td></tr></table>
            <table>
              <tr><td>Serial Number:</td><td>0001 2345</td></tr>
              <tr><td>Type:</td><td>SENIOR</td></tr>
              <tr><td>Status:</td><td>Active</td></tr>
              <tr><td>Serial Number:</td><td>678</td></tr>
              <tr><td>Type:</td><td>ADULT</td></tr>
              <tr><td>Status:</td><td>Inactive</td></tr>
            </table>"#;
        let acct = parse_account(page).unwrap();
        assert_eq!(acct.personal_details.len(), 1);
        assert_eq!(acct.personal_details["Cardholder"], "Jane Doe");
        assert_eq!(acct.cards.len(), 2);
        assert_eq!(acct.cards[0].serial_number, "00012345");
        assert_eq!(acct.cards[1].status, "Inactive");
    }

    #[test]
    fn single_table_is_content_error() {
        let err = parse_account("<table><tr><td>a</td><td>b</td></tr></table>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Content);
    }

    #[test]
    fn balance_autoload_dash_means_none() {
        let page = r#"<table>
            <tr><th>Product</th><th>Value</th><th>Autoload</th></tr>
            <tr><td>Cash value</td><td>$12.50</td><td>-</td></tr>
            <tr><td>BART HVD 60/64</td><td>$47.55</td><td>Reload when below $10</td></tr>
        </table>"#;
        let (products, features) = parse_card_balance(page).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0], CardProduct::new("Cash value", "$12.50"));
        assert_eq!(features, vec![CardFeature::new("BART HVD 60/64", "Reload when below $10")]);
    }
}
