use chrono::NaiveDateTime;
use serde::Serialize;

use crate::fmt::serialize_amount;

/// The two conversion paths, picked from the input file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Spreadsheet,
    Document,
}

impl Pipeline {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Document),
            _ => None,
        }
    }

    /// YNAB account every record of this pipeline is booked on.
    pub fn account(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Argenta",
            Self::Document => "Argenta Mastercard",
        }
    }

    pub fn output_prefix(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "ynab4_import_",
            Self::Document => "ynab4_import_pdf_",
        }
    }

    /// Human name used in error messages.
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "Excel",
            Self::Document => "PDF",
        }
    }

    pub fn saved_label(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "CSV file",
            Self::Document => "PDF data",
        }
    }
}

/// One row of the account export spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    pub booked_at: NaiveDateTime,
    pub counterparty: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Debit,
    Credit,
}

impl Sign {
    pub fn from_char(c: char) -> Self {
        if c == '-' {
            Self::Debit
        } else {
            Self::Credit
        }
    }
}

/// A transaction line lifted out of the card statement table.
///
/// Statement lines carry a booking date and a value date; only the booking
/// date is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedTransaction {
    pub booking_date: String,
    pub payee: String,
    pub amount: f64,
    pub sign: Sign,
}

impl ExtractedTransaction {
    pub fn outflow_inflow(&self) -> (f64, f64) {
        match self.sign {
            Sign::Debit => (self.amount.abs(), 0.0),
            Sign::Credit => (0.0, self.amount.abs()),
        }
    }
}

/// Split a signed amount into (outflow, inflow). At most one side is non-zero.
pub fn split_amount(amount: f64) -> (f64, f64) {
    if amount < 0.0 {
        (-amount, 0.0)
    } else {
        (0.0, amount.abs())
    }
}

/// A row of the YNAB 4 import CSV. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Account")]
    pub account: &'static str,
    #[serde(rename = "Flag")]
    pub flag: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Payee")]
    pub payee: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Master Category")]
    pub master_category: String,
    #[serde(rename = "Sub Category")]
    pub sub_category: String,
    #[serde(rename = "Memo")]
    pub memo: String,
    #[serde(rename = "Outflow", serialize_with = "serialize_amount")]
    pub outflow: f64,
    #[serde(rename = "Inflow", serialize_with = "serialize_amount")]
    pub inflow: f64,
    #[serde(rename = "Cleared")]
    pub cleared: String,
}

impl OutputRecord {
    pub fn new(
        pipeline: Pipeline,
        date: String,
        payee: String,
        memo: String,
        (outflow, inflow): (f64, f64),
    ) -> Self {
        Self {
            account: pipeline.account(),
            flag: String::new(),
            date,
            payee,
            category: String::new(),
            master_category: String::new(),
            sub_category: String::new(),
            memo,
            outflow,
            inflow,
            cleared: String::new(),
        }
    }

    pub fn from_input(row: &InputRecord) -> Self {
        Self::new(
            Pipeline::Spreadsheet,
            row.booked_at.format("%d/%m/%Y").to_string(),
            row.counterparty.clone(),
            row.description.clone(),
            split_amount(row.amount),
        )
    }

    /// Card statement records never carry a memo.
    pub fn from_transaction(txn: &ExtractedTransaction) -> Self {
        Self::new(
            Pipeline::Document,
            txn.booking_date.clone(),
            txn.payee.clone(),
            String::new(),
            txn.outflow_inflow(),
        )
    }
}
