//! Row/column layout of the seat collection for the booking pages.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use uuid::Uuid;

use crate::db::entities::seat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub id: Uuid,
    pub label: String,
    pub booked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatRow {
    pub row: String,
    pub seats: Vec<SeatCell>,
}

/// Splits `"B12"` into `("B", Some(12))`. Labels without a numeric tail get `None`.
fn split_label(label: &str) -> (String, Option<u32>) {
    let row = label.chars().next().map(String::from).unwrap_or_default();
    let digits: String = label
        .chars()
        .rev()
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    (row, digits.parse().ok())
}

fn compare_columns(a: &SeatCell, b: &SeatCell) -> Ordering {
    let (_, left) = split_label(&a.label);
    let (_, right) = split_label(&b.label);
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right).then_with(|| a.label.cmp(&b.label)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.label.cmp(&b.label),
    }
}

/// Groups seats by their leading row character and orders each row by column number.
///
/// Seats whose id is in `booked` are flagged so the page can disable them.
pub fn group_seats(seats: &[seat::Model], booked: &HashSet<Uuid>) -> Vec<SeatRow> {
    let mut rows: BTreeMap<String, Vec<SeatCell>> = BTreeMap::new();
    for seat in seats {
        let (row, _) = split_label(&seat.seat_number);
        rows.entry(row).or_default().push(SeatCell {
            id: seat.id,
            label: seat.seat_number.clone(),
            booked: booked.contains(&seat.id),
        });
    }

    rows.into_iter()
        .map(|(row, mut seats)| {
            seats.sort_by(compare_columns);
            SeatRow { row, seats }
        })
        .collect()
}

/// Labels `<row><column>` for every row letter and columns `1..=columns`.
pub fn default_grid_labels(rows: &str, columns: u32) -> Vec<String> {
    rows.chars()
        .flat_map(|row| (1..=columns).map(move |column| format!("{row}{column}")))
        .collect()
}
