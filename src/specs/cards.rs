// src/specs/cards.rs
//
// Cards from the account dashboard.
//
// The card list sits between two HTML comments. Each card is one
// `whiteGreyCardBox` block holding label/value pairs (serial, type, status),
// product rows and an optional auto-reload list. Nicknames live in separate
// header rows; each block takes the closest header before it.
//
// One bad block does not sink the page: it is logged, recorded in
// `CardsReport::failures`, and the remaining blocks are still built.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{
    CARDS_BEGIN, CARDS_END, CARD_BLOCK_CLASS, NICKNAME_LABEL, PRODUCT_VALUE_PATTERN,
    RELOAD_CLASS_HINT, RELOAD_FEATURE_NAME, SERIAL_LABEL, STATUS_LABEL, TYPE_LABEL,
};
use crate::config::ExtractOptions;
use crate::core::html::{
    extract_bounded_section, find_all, label_before_value, labelled_value, value_after_label,
    Anchor, TextMatch,
};
use crate::core::sanitize::{digits_only, split_label};
use crate::core::Node;
use crate::data::{Card, CardFailure, CardFeature, CardProduct, CardsReport};
use crate::error::Result;

// Literal pattern, compiled once.
static PRODUCT_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PRODUCT_VALUE_PATTERN).expect("product value pattern compiles"));

pub fn parse_cards(page: &str) -> Result<CardsReport> {
    parse_cards_with(page, &ExtractOptions::default())
}

/// Fails only when the card section itself is missing; per-card problems
/// end up in the report.
pub fn parse_cards_with(page: &str, opts: &ExtractOptions) -> Result<CardsReport> {
    if let Some(path) = &opts.debug_capture {
        capture(path, page);
    }
    let section = extract_bounded_section(page, CARDS_BEGIN, CARDS_END)?;
    Ok(parse_cards_tree(section.root_element()))
}

pub fn parse_cards_tree<N: Node>(root: N) -> CardsReport {
    let blocks = paired_blocks(root);
    logd!("found {} card blocks", blocks.len());

    let mut report = CardsReport::default();
    let mut serials = HashSet::new();
    for (index, (block, nickname)) in blocks.into_iter().enumerate() {
        let built = build_card(block, nickname).and_then(|card| {
            if serials.insert(card.serial_number.clone()) {
                Ok(card)
            } else {
                Err(content_err!("unique serial number, {} appears twice", card.serial_number))
            }
        });
        match built {
            Ok(card) => report.cards.push(card),
            Err(error) => {
                loge!("card block {index} skipped: {error}");
                report.failures.push(CardFailure { index, error });
            }
        }
    }
    report
}

/// Card blocks in page order, each with the nickname from the closest
/// "Card Nickname:" header between it and the previous block.
fn paired_blocks<N: Node>(root: N) -> Vec<(N, Option<String>)> {
    let block_anchor = Anchor::tag("div").with_class(CARD_BLOCK_CLASS);
    let header_anchor = Anchor::any().with_text(TextMatch::Exact(NICKNAME_LABEL));

    let mut out = Vec::new();
    let mut pending: Option<Option<String>> = None;
    let mut orphans = 0;
    for node in root.element_descendants() {
        if block_anchor.matches(node) {
            out.push((node, pending.take().flatten()));
        } else if header_anchor.matches(node) && !within(node, is_card_block) {
            if pending.replace(value_after_label(node)).is_some() {
                orphans += 1;
            }
        }
    }
    if orphans > 0 || pending.is_some() {
        logw!("{} nickname headers without a card block", orphans + usize::from(pending.is_some()));
    }
    out
}

fn build_card<N: Node>(block: N, nickname: Option<String>) -> Result<Card> {
    let nickname = nickname.ok_or_else(|| content_err!("{NICKNAME_LABEL:?} header for card block"))?;
    let serial_number = digits_only(&required(block, SERIAL_LABEL)?);
    if serial_number.is_empty() {
        return Err(content_err!("digits in {SERIAL_LABEL:?} value"));
    }
    Ok(Card {
        serial_number,
        nickname,
        kind: required(block, TYPE_LABEL)?,
        status: required(block, STATUS_LABEL)?,
        products: card_products(block)?,
        features: card_features(block),
    })
}

fn required<N: Node>(block: N, label: &str) -> Result<String> {
    labelled_value(block, label).ok_or_else(|| content_err!("value after label {label:?}"))
}

/// Currency and "Valid till" cells, named by the label before them.
fn card_products<N: Node>(block: N) -> Result<Vec<CardProduct>> {
    let anchor = Anchor::tag("div").with_text(TextMatch::Pattern(&PRODUCT_VALUE));
    find_all(block, &anchor)
        .into_iter()
        .filter(|n| !within_reload(*n))
        .map(|value| {
            let text = value.normalized_text();
            let name = label_before_value(value)
                .ok_or_else(|| content_err!("label before product value {text:?}"))?;
            Ok(CardProduct { name, value: text })
        })
        .collect()
}

/// `<li>` items of the outermost reload sections.
fn card_features<N: Node>(block: N) -> Vec<CardFeature> {
    block
        .element_descendants()
        .into_iter()
        .filter(|n| is_reload_section(*n) && !n.parent_element().is_some_and(within_reload))
        .flat_map(|section| find_all(section, &Anchor::tag("li")))
        .map(|li| li.normalized_text())
        .filter(|text| !text.is_empty())
        .map(|text| match split_label(&text) {
            Some((name, value)) => CardFeature { name, value },
            None => CardFeature::new(RELOAD_FEATURE_NAME, text),
        })
        .collect()
}

fn is_reload_section<N: Node>(node: N) -> bool {
    node.attribute("class")
        .is_some_and(|c| c.to_ascii_lowercase().contains(RELOAD_CLASS_HINT))
}

fn is_card_block<N: Node>(node: N) -> bool {
    node.has_class(CARD_BLOCK_CLASS)
}

fn within_reload<N: Node>(node: N) -> bool {
    within(node, is_reload_section)
}

/// `node` or any of its ancestors satisfies `pred`.
fn within<N: Node>(node: N, pred: fn(N) -> bool) -> bool {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if pred(n) { return true; }
        cur = n.parent_element();
    }
    false
}

fn capture(path: &Path, page: &str) {
    match fs::write(path, page) {
        Ok(()) => logf!("account page HTML saved in {}", path.display()),
        Err(e) => loge!("could not save account page to {}: {e}", path.display()),
    }
}
