//! Terminal rendering: tables in a row window, status badges, money.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use colored::{Color, Colorize};
use installment_core::contract::PaymentStatus;
use installment_core::theme::Theme;
use installment_core::view::Viewport;

/// The visible slice of a table. The offset is the scroll position that
/// refreshes capture and restore.
pub struct TerminalViewport {
    offset: AtomicUsize,
    rows: usize,
}

impl TerminalViewport {
    pub fn new(offset: usize, rows: usize) -> Self {
        Self {
            offset: AtomicUsize::new(offset),
            rows: rows.max(1),
        }
    }

    /// Index range of the rows shown out of `total`.
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.offset.load(Ordering::SeqCst).min(total);
        start..(start + self.rows).min(total)
    }
}

impl Viewport for TerminalViewport {
    fn scroll_offset(&self) -> usize {
        self.offset.load(Ordering::SeqCst)
    }

    fn restore_scroll(&self, offset: usize) {
        self.offset.store(offset, Ordering::SeqCst);
    }
}

/// How a status reads at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Warn,
    Bad,
    Neutral,
}

impl Tone {
    pub fn of_status(status: &str) -> Self {
        match status {
            "APPROVED" | "ACTIVE" => Tone::Good,
            "PENDING" => Tone::Warn,
            "REJECTED" | "OVERDUE" => Tone::Bad,
            _ => Tone::Neutral,
        }
    }

    pub fn of_payment(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Paid => Tone::Good,
            PaymentStatus::Unpaid => Tone::Warn,
            PaymentStatus::Overdue => Tone::Bad,
        }
    }

    fn color(self, theme: Theme) -> Color {
        match (self, theme.is_dark()) {
            (Tone::Good, true) => Color::BrightGreen,
            (Tone::Good, false) => Color::Green,
            (Tone::Warn, true) => Color::BrightYellow,
            (Tone::Warn, false) => Color::Yellow,
            (Tone::Bad, true) => Color::BrightRed,
            (Tone::Bad, false) => Color::Red,
            (Tone::Neutral, true) => Color::BrightBlack,
            (Tone::Neutral, false) => Color::Black,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    text: String,
    tone: Option<Tone>,
}

impl Cell {
    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone: Some(tone),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, tone: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Prints the rows inside `viewport`'s window, with a position footer.
    pub fn print(&self, viewport: &TerminalViewport, theme: Theme) {
        if self.rows.is_empty() {
            println!("{}", "No records.".dimmed());
            return;
        }

        let window = viewport.window(self.rows.len());
        if window.is_empty() {
            println!(
                "{}",
                format!("No rows past offset {} ({} total).", window.start, self.rows.len()).dimmed()
            );
            return;
        }
        let visible = &self.rows[window.clone()];
        let widths: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                visible
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.text.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(h, *w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", header.bold());

        for row in visible {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    let padded = pad(&cell.text, *w);
                    match cell.tone {
                        Some(tone) => padded.color(tone.color(theme)).to_string(),
                        None => padded,
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            println!("{}", line);
        }

        if window.len() < self.rows.len() {
            println!(
                "{}",
                format!(
                    "rows {}-{} of {}",
                    window.start + 1,
                    window.end,
                    self.rows.len()
                )
                .dimmed()
            );
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Formats an amount as Vietnamese đồng: `1.000.000 ₫`.
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{} ₫", sign, grouped)
}

pub fn format_money(amount: Option<f64>) -> String {
    amount.map(format_vnd).unwrap_or_else(|| "-".to_string())
}

/// Renders a timestamp from the gateway as `dd/mm/yyyy`; anything
/// unparseable is shown as received.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn heading(title: &str, theme: Theme) {
    let title = if theme.is_dark() {
        title.bright_cyan()
    } else {
        title.blue()
    };
    println!("{}", title.bold());
}
