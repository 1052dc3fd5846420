//! Card statement text parser.
//!
//! Expected extracted-text section:
//!   TRAD NA ST AU CM TIE VERD RA ET KU EM NING OMSCHRIJVING BEDRAG (EUR)
//!   01/05 02/05 COFFEE SHOP BRUSSEL 12,50-
//!   03/05 03/05 TERUGBETALING 1.234,56+
//!   <blank line ends the table>

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::fmt::parse_eu_amount;
use crate::models::{ExtractedTransaction, Sign};

/// Banner printed above the transaction table. Matched as a line prefix.
pub const TABLE_BANNER: &str =
    "TRAD NA ST AU CM TIE VERD RA ET KU EM NING OMSCHRIJVING BEDRAG (EUR)";

fn txn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // BOOKING VALUE DESCRIPTION AMOUNT+SIGN, anchored on the whole line
        Regex::new(r"^(\d{2}/\d{2}) (\d{2}/\d{2}) (.+?) ([\d.,]+)([+-])$")
            .expect("transaction pattern is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Seeking,
    InTable,
}

/// What a single line did to the scan.
#[derive(Debug, PartialEq)]
pub enum Step {
    Skip,
    Transaction(ExtractedTransaction),
    End,
}

/// Two-state line scanner. `Seeking -> InTable` is the only transition and a
/// blank line inside the table ends the scan for good.
#[derive(Debug)]
pub struct TableScanner {
    state: ScanState,
}

impl Default for TableScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TableScanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Seeking,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed one line. `line_no` is only used for error reporting.
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<Step> {
        match self.state {
            ScanState::Seeking => {
                if line.starts_with(TABLE_BANNER) {
                    self.state = ScanState::InTable;
                }
                Ok(Step::Skip)
            }
            ScanState::InTable => {
                if line.trim().is_empty() {
                    return Ok(Step::End);
                }
                // Continuation lines and stray text inside the table are dropped.
                match parse_transaction_line(line_no, line)? {
                    Some(txn) => Ok(Step::Transaction(txn)),
                    None => Ok(Step::Skip),
                }
            }
        }
    }
}

/// Parse one table line. `Ok(None)` when the line is not a transaction.
pub fn parse_transaction_line(line_no: usize, line: &str) -> Result<Option<ExtractedTransaction>> {
    let Some(caps) = txn_re().captures(line) else {
        return Ok(None);
    };
    let token = &caps[4];
    let amount = parse_eu_amount(token).ok_or_else(|| ConvertError::StatementAmount {
        line: line_no,
        token: token.to_string(),
    })?;
    // The pattern pins the sign to the last character of the line.
    let sign = if line.ends_with('-') {
        Sign::Debit
    } else {
        Sign::Credit
    };
    debug_assert_eq!(Some(sign), caps[5].chars().next().map(Sign::from_char));

    Ok(Some(ExtractedTransaction {
        booking_date: caps[1].to_string(),
        payee: caps[3].trim().to_string(),
        amount,
        sign,
    }))
}

/// Scan extracted statement text and return the table's transactions in order.
pub fn parse_statement_text(text: &str) -> Result<Vec<ExtractedTransaction>> {
    let mut scanner = TableScanner::new();
    let mut out = Vec::new();
    for (line_no, line) in (1..).zip(text.lines()) {
        match scanner.feed(line_no, line)? {
            Step::Skip => {}
            Step::Transaction(txn) => out.push(txn),
            Step::End => break,
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_coffee_shop_debit() {
        let txn = parse_transaction_line(1, "01/05 01/05 COFFEE SHOP 12,50-")
            .unwrap()
            .unwrap();
        assert_eq!(txn.booking_date, "01/05");
        assert_eq!(txn.payee, "COFFEE SHOP");
        assert_eq!(txn.amount, 12.50);
        assert_eq!(txn.sign, Sign::Debit);
        assert_eq!(txn.outflow_inflow(), (12.50, 0.0));
    }

    #[test]
    fn test_salary_credit_with_thousands() {
        let txn = parse_transaction_line(1, "01/05 01/05 SALARY 1.234,56+")
            .unwrap()
            .unwrap();
        assert_eq!(txn.amount, 1234.56);
        assert_eq!(txn.outflow_inflow(), (0.0, 1234.56));
    }

    #[test]
    fn test_value_date_dropped() {
        let txn = parse_transaction_line(1, "28/04 02/05 HOTEL GENT 310,00-")
            .unwrap()
            .unwrap();
        assert_eq!(txn.booking_date, "28/04");
    }

    #[test]
    fn test_non_matching_lines() {
        for line in [
            "01/05 01/05 COFFEE SHOP 12,50- ",
            "01/05 01/05 COFFEE SHOP 12,50 -",
            "01/05 COFFEE SHOP 12,50-",
            "  01/05 01/05 COFFEE SHOP 12,50-",
            "Mastercard Gold",
            "01/05 01/05 12,50-",
        ] {
            assert_eq!(parse_transaction_line(1, line).unwrap(), None, "{line}");
        }
    }

    #[test]
    fn test_unparseable_amount_is_error() {
        let err = parse_transaction_line(7, "01/05 01/05 SHOP 1,2,3-").unwrap_err();
        assert!(matches!(err, ConvertError::StatementAmount { line: 7, .. }));
    }

    #[test]
    fn test_scanner_states() {
        let mut scanner = TableScanner::new();
        assert_eq!(scanner.state(), ScanState::Seeking);
        assert_eq!(scanner.feed(1, "01/05 01/05 BEFORE TABLE 1,00-").unwrap(), Step::Skip);
        assert_eq!(scanner.state(), ScanState::Seeking);
        assert_eq!(scanner.feed(2, TABLE_BANNER).unwrap(), Step::Skip);
        assert_eq!(scanner.state(), ScanState::InTable);
        assert!(matches!(
            scanner.feed(3, "01/05 01/05 SHOP 1,00-").unwrap(),
            Step::Transaction(_)
        ));
        assert_eq!(scanner.feed(4, "   ").unwrap(), Step::End);
    }

    #[test]
    fn test_blank_line_before_banner_is_ignored() {
        let mut scanner = TableScanner::new();
        assert_eq!(scanner.feed(1, "").unwrap(), Step::Skip);
        assert_eq!(scanner.state(), ScanState::Seeking);
    }

    #[test]
    fn test_parse_statement_table_region_only() {
        let text = statement(&[
            "Argenta Mastercard overzicht",
            "30/04 30/04 OUTSIDE TABLE 5,00-",
            &format!("{TABLE_BANNER} vervolg"),
            "01/05 01/05 COFFEE SHOP 12,50-",
            "BRUSSEL BE",
            "02/05 03/05 SALARY 1.234,56+",
            "",
            "04/05 04/05 AFTER TABLE 9,99-",
        ]);
        let txns = parse_statement_text(&text).unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].payee, "COFFEE SHOP");
        assert_eq!(txns[1].payee, "SALARY");
        assert_eq!(txns[1].booking_date, "02/05");
    }

    #[test]
    fn test_stops_before_second_table() {
        let text = statement(&[
            TABLE_BANNER,
            "01/05 01/05 FIRST 1,00-",
            "",
            TABLE_BANNER,
            "02/05 02/05 SECOND 2,00-",
        ]);
        let txns = parse_statement_text(&text).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].payee, "FIRST");
    }

    #[test]
    fn test_table_without_terminator_runs_to_end() {
        let text = statement(&[
            TABLE_BANNER,
            "01/05 01/05 ONE 1,00-",
            "02/05 02/05 TWO 2,00+",
        ]);
        assert_eq!(parse_statement_text(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_no_banner_yields_nothing() {
        let text = statement(&["01/05 01/05 COFFEE SHOP 12,50-"]);
        assert!(parse_statement_text(&text).unwrap().is_empty());
    }

    #[test]
    fn test_crlf_lines() {
        let text = format!("{TABLE_BANNER}\r\n01/05 01/05 SHOP 3,20-\r\n\r\n");
        let txns = parse_statement_text(&text).unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, 3.2);
    }

    #[test]
    fn test_payee_trimmed() {
        let txns = parse_statement_text(&statement(&[TABLE_BANNER, "01/05 01/05   SPACED  OUT   4,00-"]))
            .unwrap();
        assert_eq!(txns[0].payee, "SPACED  OUT");
    }
}
