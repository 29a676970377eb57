// src/lib.rs
//! Unofficial Clipper Card client: log in, fetch the account dashboard and
//! read the cardholder profile and cards out of its HTML.

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod error;
pub mod report;
pub mod session;
pub mod specs;

pub use data::{Account, Card, CardFailure, CardFeature, CardProduct, CardsReport, Profile};
pub use error::{Error, ErrorKind, Result};
pub use session::Session;
