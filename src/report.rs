// src/report.rs
//
// Human-facing output: a two-section text table (profile, then cards) or the
// cards as CSV/TSV. Cards keep page order.

use crate::config::OutputFormat;
use crate::csv::rows_to_string;
use crate::data::{Card, Profile};

pub const CARD_HEADERS: [&str; 6] = ["Card", "Serial", "Type", "Status", "Product", "Value"];
pub const FEATURE_HEADERS: [&str; 4] = ["Card", "Serial", "Feature", "Detail"];

pub fn render(profile: &Profile, cards: &[Card], format: OutputFormat) -> String {
    match format.delim() {
        Some(sep) => {
            let headers: Vec<String> = CARD_HEADERS.iter().map(|h| s!(*h)).collect();
            rows_to_string(Some(headers.as_slice()), &card_rows(cards), sep)
        }
        None => tabular_output(profile, cards),
    }
}

/// Profile table, cards table, and a features table when any card has one.
pub fn tabular_output(profile: &Profile, cards: &[Card]) -> String {
    let profile_rows: Vec<Vec<String>> = profile
        .fields()
        .into_iter()
        .map(|(k, v)| vec![s!(k), s!(v)])
        .collect();
    let mut sections = vec![
        TextTable::new(None, profile_rows).align(vec![Align::Right, Align::Left]).render(),
        TextTable::new(Some(&CARD_HEADERS[..]), card_rows(cards)).render(),
    ];
    let features = feature_rows(cards);
    if !features.is_empty() {
        sections.push(TextTable::new(Some(&FEATURE_HEADERS[..]), features).render());
    }
    sections.join("\n")
}

/// One row per product; a card without products still gets a row.
pub fn card_rows(cards: &[Card]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for c in cards {
        let head = [&c.nickname, &c.serial_number, &c.kind, &c.status];
        let mut push = |name: &str, value: &str| {
            let mut row: Vec<String> = head.iter().map(|s| s.to_string()).collect();
            row.push(s!(name));
            row.push(s!(value));
            rows.push(row);
        };
        if c.products.is_empty() {
            push("", "");
        }
        for p in &c.products {
            push(&p.name, &p.value);
        }
    }
    rows
}

pub fn feature_rows(cards: &[Card]) -> Vec<Vec<String>> {
    cards
        .iter()
        .flat_map(|c| {
            c.features
                .iter()
                .map(|f| vec![c.nickname.clone(), c.serial_number.clone(), f.name.clone(), f.value.clone()])
        })
        .collect()
}

/* ---------------- Text table ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub struct TextTable {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
    align: Vec<Align>,
}

impl TextTable {
    pub fn new(headers: Option<&[&str]>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.map(|h| h.iter().map(|s| s!(*s)).collect()),
            rows,
            align: Vec::new(),
        }
    }

    /// Per-column alignment; columns past the end are left-aligned.
    pub fn align(mut self, align: Vec<Align>) -> Self {
        self.align = align;
        self
    }

    pub fn render(&self) -> String {
        let cols = self
            .headers
            .iter()
            .chain(self.rows.iter())
            .map(|r| r.len())
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; cols];
        for row in self.headers.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let border = {
            let mut b = s!("+");
            for w in &widths {
                b.push_str(&"-".repeat(w + 2));
                b.push('+');
            }
            b
        };

        let mut out = Vec::new();
        out.push(border.clone());
        if let Some(h) = &self.headers {
            out.push(self.line(h, &widths, true));
            out.push(border.clone());
        }
        for r in &self.rows {
            out.push(self.line(r, &widths, false));
        }
        out.push(border);
        out.join("\n")
    }

    fn line(&self, row: &[String], widths: &[usize], header: bool) -> String {
        let mut l = s!("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = w - cell.chars().count();
            let align = if header { Align::Left } else { self.align.get(i).copied().unwrap_or(Align::Left) };
            let padded = match align {
                Align::Left => format!("{cell}{}", " ".repeat(pad)),
                Align::Right => format!("{}{cell}", " ".repeat(pad)),
            };
            l.push(' ');
            l.push_str(&padded);
            l.push_str(" |");
        }
        l
    }
}
