// src/specs/mod.rs
//! # Page specs
//!
//! One module per page shape of the Clipper Card site. Each module knows where
//! the ground truth lives in that page's HTML and how to pull it out through
//! the anchor helpers in `core::html`:
//!
//! - `login`   – anti-forgery token on the login form, rejected-login marker.
//! - `profile` – cardholder profile on the dashboard (6 or 7 value layout).
//! - `cards`   – card blocks on the dashboard, one `Card` per block.
//! - `account` – the oldest table-based account and balance pages.
//!
//! Specs only read pages. Fetching, session state and output live elsewhere.
//! They are testable offline against saved fixtures in `tests/fixtures/`.
pub mod account;
pub mod cards;
pub mod login;
pub mod profile;

pub use account::{parse_account, parse_card_balance};
pub use cards::{parse_cards, parse_cards_with};
pub use login::parse_login_form_token;
pub use profile::parse_profile;
