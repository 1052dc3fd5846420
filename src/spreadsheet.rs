use std::path::Path;

use calamine::{Data, Range, Reader};

use crate::error::{ConvertError, Result};
use crate::fmt::{excel_serial_to_datetime, parse_iso_datetime};
use crate::models::{InputRecord, OutputRecord};

// Column headers of the Argenta account export.
pub const COL_BOOKED_AT: &str = "Verrichtingsdatum";
pub const COL_COUNTERPARTY: &str = "Naam tegenpartij";
pub const COL_DESCRIPTION: &str = "Mededeling";
pub const COL_AMOUNT: &str = "Bedrag";

static EMPTY: Data = Data::Empty;

/// Load every row of the first worksheet. The workbook is closed on return.
pub fn load_rows(file_path: &Path) -> Result<Vec<InputRecord>> {
    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| ConvertError::Workbook(e.to_string()))?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ConvertError::Workbook("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| ConvertError::Workbook(e.to_string()))?;
    read_records(&range)
}

/// Convert an account export into YNAB records, one per row, in sheet order.
pub fn convert(file_path: &Path) -> Result<Vec<OutputRecord>> {
    let rows = load_rows(file_path)?;
    Ok(rows.iter().map(OutputRecord::from_input).collect())
}

struct Columns {
    booked_at: usize,
    counterparty: usize,
    description: usize,
    amount: usize,
}

impl Columns {
    fn locate(header: &[Data]) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(s) if s == name))
                .ok_or_else(|| ConvertError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            booked_at: find(COL_BOOKED_AT)?,
            counterparty: find(COL_COUNTERPARTY)?,
            description: find(COL_DESCRIPTION)?,
            amount: find(COL_AMOUNT)?,
        })
    }
}

/// Map a worksheet (header row first) to input records.
///
/// Fully empty rows are skipped. A booking date that is not a date/time cell,
/// or an amount that is not numeric, fails the whole sheet.
pub fn read_records(range: &Range<Data>) -> Result<Vec<InputRecord>> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(ConvertError::MissingColumn(COL_BOOKED_AT.to_string()));
    };
    let cols = Columns::locate(header)?;

    let mut records = Vec::new();
    // calamine trims leading empty rows; report 1-based sheet row numbers.
    let header_row = range.start().map_or(0, |(r, _)| r as usize);
    for (row_no, row) in (header_row + 2..).zip(rows) {
        if row.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let cell = |idx: usize| row.get(idx).unwrap_or(&EMPTY);

        let booked_at = cell_datetime(cell(cols.booked_at)).ok_or_else(|| {
            ConvertError::InvalidDate {
                row: row_no,
                value: cell(cols.booked_at).to_string(),
            }
        })?;
        let amount = cell_amount(cell(cols.amount)).ok_or_else(|| ConvertError::InvalidAmount {
            row: row_no,
            value: cell(cols.amount).to_string(),
        })?;

        records.push(InputRecord {
            booked_at,
            counterparty: cell_text(cell(cols.counterparty)),
            description: cell_text(cell(cols.description)),
            amount,
        });
    }
    Ok(records)
}

fn cell_datetime(cell: &Data) -> Option<chrono::NaiveDateTime> {
    match cell {
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso_datetime(s),
        _ => None,
    }
}

fn cell_amount(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
