// src/specs/profile.rs
//
// Cardholder profile from the account dashboard.
//
// The profile box is a flat run of `fieldData` cells. Two layouts exist:
//   6 values: name, email, street, city+state, zip, phone
//   7 values: name, email, street, street line 2, city+state, zip, phone
// The "Email Updates" Yes/No cell and the edit-link cell are noise and are
// dropped before counting. A blank second street line is dropped too; any
// other blank value fails the profile. Alternate phone and payment methods sit outside
// that run and are read by label when present.

use scraper::Html;

use crate::config::consts::{
    ALT_PHONE_LABEL, BACKUP_PAYMENT_LABEL, EDIT_PROFILE_LINK, EMAIL_UPDATES_LABEL, OPT_IN_VALUES,
    PRIMARY_PAYMENT_LABEL, PROFILE_CLASS, PROFILE_FIELD_CLASS,
};
use crate::core::html::{find_all, find_first, label_before_value, labelled_value, Anchor};
use crate::core::Node;
use crate::data::Profile;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileShape {
    /// No second street line.
    Standard,
    WithAddressLine2,
}

impl ProfileShape {
    pub fn detect(value_count: usize) -> Option<Self> {
        match value_count {
            6 => Some(ProfileShape::Standard),
            7 => Some(ProfileShape::WithAddressLine2),
            _ => None,
        }
    }

    pub fn address_fields(self) -> usize {
        match self {
            ProfileShape::Standard => 3,
            ProfileShape::WithAddressLine2 => 4,
        }
    }
}

pub fn parse_profile(page: &str) -> Result<Profile> {
    let doc = Html::parse_document(page);
    parse_profile_tree(doc.root_element())
}

/// All-or-nothing: any missing mandatory part fails the whole profile.
pub fn parse_profile_tree<N: Node>(root: N) -> Result<Profile> {
    let container = find_first(root, &Anchor::tag("div").with_class(PROFILE_CLASS))
        .ok_or_else(|| content_err!("profile container div.{PROFILE_CLASS}"))?;

    let mut values = profile_values(container);
    if values.len() == 7 && values[3].is_empty() {
        values.remove(3);
    }
    if let Some(i) = values.iter().position(|v| v.is_empty()) {
        return Err(content_err!("non-blank profile value at position {i}: {:?}", values));
    }
    let shape = ProfileShape::detect(values.len()).ok_or_else(|| {
        content_err!("6 or 7 profile values, found {}: {:?}", values.len(), values)
    })?;
    logd!("profile shape {:?}", shape);

    let addr_end = 2 + shape.address_fields();
    Ok(Profile {
        name: values[0].clone(),
        email: values[1].clone(),
        address: values[2..addr_end].join(" "),
        phone: values[addr_end].clone(),
        alt_phone: labelled_value(root, ALT_PHONE_LABEL),
        primary_payment: labelled_value(root, PRIMARY_PAYMENT_LABEL),
        backup_payment: labelled_value(root, BACKUP_PAYMENT_LABEL),
    })
}

/// Normalized `fieldData` texts in page order. Blanks are kept; the edit link
/// and the one email opt-in cell are not.
fn profile_values<N: Node>(container: N) -> Vec<String> {
    let mut cells: Vec<(Option<String>, String)> =
        find_all(container, &Anchor::any().with_class(PROFILE_FIELD_CLASS))
            .into_iter()
            .map(|n| (label_before_value(n), n.normalized_text()))
            .filter(|(_, v)| v != EDIT_PROFILE_LINK)
            .collect();

    // Found by its label; unlabelled pages put it last.
    let opt_in = cells
        .iter()
        .position(|(label, v)| label.as_deref() == Some(EMAIL_UPDATES_LABEL) && is_opt_in(v))
        .or_else(|| cells.last().filter(|(_, v)| is_opt_in(v)).map(|_| cells.len() - 1));
    if let Some(i) = opt_in {
        cells.remove(i);
    }
    cells.into_iter().map(|(_, v)| v).collect()
}

fn is_opt_in(value: &str) -> bool {
    OPT_IN_VALUES.contains(&value)
}
