use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::errors::InvalidAccountingAmount;

/// Amount as exported by accounting tools: thousands separators, and
/// negatives either with a minus sign or in parentheses. Blank means zero.
#[derive(Debug)]
pub(crate) struct AccountingAmountModel(pub f64);
impl FromStr for AccountingAmountModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.replace(",", "");
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(AccountingAmountModel(0.0));
        }
        let is_negative = raw.starts_with("(") && raw.ends_with(")");
        let numeric_part = raw.trim_matches(|c| c == '(' || c == ')').trim();
        let amount = numeric_part
            .parse::<f64>()
            .map_err(|_| InvalidAccountingAmount::new(s))?;
        Ok(AccountingAmountModel(if is_negative {
            -amount
        } else {
            amount
        }))
    }
}

impl Into<f64> for AccountingAmountModel {
    fn into(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Option<f64> {
        AccountingAmountModel::from_str(s).ok().map(Into::into)
    }

    #[test]
    fn test_parses_accounting_formats() {
        assert_eq!(parse("1,200.50"), Some(1200.5));
        assert_eq!(parse("(1,200.50)"), Some(-1200.5));
        assert_eq!(parse("-3"), Some(-3.0));
        assert_eq!(parse("  "), Some(0.0));
        assert_eq!(parse("12abc"), None);
    }
}
