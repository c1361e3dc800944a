use std::{collections::HashMap, str::FromStr as _};

use fractic_server_error::ServerError;

use crate::{
    data::models::accounting_amount_model::AccountingAmountModel,
    entities::{AccountCode, AccountId, AccountRecord, MetricField, Metrics, ParentRef},
    errors::InvalidAccountingAmount,
};

// Accepted column names, after normalization.
const ID_KEYS: &[&str] = &["id", "headid", "accountid"];
const CODE_KEYS: &[&str] = &["code", "headcode", "accountcode"];
const NAME_KEYS: &[&str] = &["name", "headname", "accountname", "title"];
const PARENT_KEYS: &[&str] = &["parentref", "parenthead", "parentid", "parentcode", "parent"];
const CONTROL_KEYS: &[&str] = &["iscontrol", "control", "controlaccount"];
const ACTIVE_KEYS: &[&str] = &["isactive", "active"];
const DELETED_KEYS: &[&str] = &["isdeleted", "deleted"];

fn metric_keys(field: MetricField) -> &'static [&'static str] {
    match field {
        MetricField::OpeningDebit => &["openingdebit", "openingdr"],
        MetricField::OpeningCredit => &["openingcredit", "openingcr"],
        MetricField::ClosingDebit => &["closingdebit", "closingdr"],
        MetricField::ClosingCredit => &["closingcredit", "closingcr"],
        MetricField::Opening => &["opening", "openingbalance"],
        MetricField::Debit => &["debit", "dr"],
        MetricField::Credit => &["credit", "cr"],
        MetricField::Balance => &["balance", "closingbalance"],
    }
}

/// Field names differ between backends (`headCode`, `HeadCode`,
/// `head_code`...). They all map to the same key: lowercase, alphanumerics
/// only.
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    fn is_blank(&self) -> bool {
        match self {
            RawValue::Null => true,
            RawValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            RawValue::Number(n) => Some(n.to_string()),
            RawValue::Text(s) => Some(s.trim().to_string()),
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(*b),
            RawValue::Number(n) => Some(*n != 0.0),
            RawValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "y" | "t" => Some(true),
                "false" | "0" | "no" | "n" | "f" => Some(false),
                _ => None,
            },
        }
    }

    fn as_amount(&self) -> Result<f64, ServerError> {
        match self {
            RawValue::Null => Ok(0.0),
            RawValue::Bool(b) => Err(InvalidAccountingAmount::new(&b.to_string())),
            RawValue::Number(n) => Ok(*n),
            RawValue::Text(s) => Ok(AccountingAmountModel::from_str(s)?.into()),
        }
    }
}

/// One source row with normalized field names, before interpretation.
#[derive(Debug, Default)]
pub(crate) struct RawAccountRowModel {
    fields: HashMap<String, RawValue>,
}

impl RawAccountRowModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// If several source fields normalize to the same key, the first
    /// non-blank one is kept.
    pub(crate) fn insert(&mut self, key: &str, value: RawValue) {
        let key = normalize_key(key);
        match self.fields.get(&key) {
            Some(existing) if !existing.is_blank() => {}
            _ => {
                self.fields.insert(key, value);
            }
        }
    }

    fn lookup(&self, keys: &[&str]) -> Option<&RawValue> {
        keys.iter()
            .filter_map(|k| self.fields.get(*k))
            .find(|v| !v.is_blank())
    }

    fn text(&self, keys: &[&str]) -> Option<String> {
        self.lookup(keys).and_then(RawValue::as_text)
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        self.lookup(keys).and_then(RawValue::as_bool)
    }

    pub(crate) fn into_record<M: Metrics>(self) -> Result<AccountRecord<M>, ServerError> {
        let mut own_metrics = M::zero();
        for field in M::FIELDS {
            let value = match self.lookup(metric_keys(*field)) {
                Some(raw) => raw.as_amount()?,
                None => 0.0,
            };
            own_metrics.set(*field, value);
        }

        let is_active =
            self.flag(ACTIVE_KEYS).unwrap_or(true) && !self.flag(DELETED_KEYS).unwrap_or(false);

        Ok(AccountRecord {
            id: self
                .text(ID_KEYS)
                .and_then(|s| s.parse::<i64>().ok())
                .map(AccountId),
            code: AccountCode(self.text(CODE_KEYS).unwrap_or_default()),
            name: self.text(NAME_KEYS).unwrap_or_default(),
            parent: ParentRef::parse(self.text(PARENT_KEYS).as_deref()),
            own_metrics,
            is_control: self.flag(CONTROL_KEYS).unwrap_or(false),
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{movement, opening_closing, MovementMetrics, OpeningClosingMetrics};

    fn row(fields: &[(&str, RawValue)]) -> RawAccountRowModel {
        let mut row = RawAccountRowModel::new();
        for (k, v) in fields {
            row.insert(k, v.clone());
        }
        row
    }

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("headCode"), "headcode");
        assert_eq!(normalize_key("HeadCode"), "headcode");
        assert_eq!(normalize_key("head_code"), "headcode");
        assert_eq!(normalize_key("Opening Debit"), "openingdebit");
    }

    #[test]
    fn test_differently_cased_backends_give_same_record() {
        let a = row(&[
            ("HeadId", RawValue::Number(4.0)),
            ("HeadCode", RawValue::Number(1100.0)),
            ("HeadName", text("Cash")),
            ("ParentHead", RawValue::Number(1.0)),
            ("OpeningDebit", text("1,000")),
        ])
        .into_record::<OpeningClosingMetrics>()
        .unwrap();
        let b = row(&[
            ("head_id", text("4")),
            ("headCode", text("1100")),
            ("headName", text("Cash")),
            ("parentHead", text("1")),
            ("opening_debit", RawValue::Number(1000.0)),
        ])
        .into_record::<OpeningClosingMetrics>()
        .unwrap();

        assert_eq!(a, b);
        assert_eq!(a.id, Some(AccountId(4)));
        assert_eq!(a.code, AccountCode("1100".into()));
        assert_eq!(a.parent, ParentRef::Ref("1".into()));
        assert_eq!(a.own_metrics, opening_closing(1000.0, 0.0, 0.0, 0.0));
        assert!(a.is_active);
        assert!(!a.is_control);
    }

    #[test]
    fn test_flags_and_root_parent() {
        let record = row(&[
            ("id", RawValue::Number(1.0)),
            ("code", text("1200")),
            ("isControl", text("Y")),
            ("parentId", RawValue::Number(0.0)),
            ("isDeleted", RawValue::Bool(true)),
        ])
        .into_record::<OpeningClosingMetrics>()
        .unwrap();
        assert!(record.is_control);
        assert!(!record.is_active);
        assert_eq!(record.parent, ParentRef::Root);
    }

    #[test]
    fn test_missing_id_is_kept() {
        let record = row(&[("code", text("9")), ("id", text(""))])
            .into_record::<MovementMetrics>()
            .unwrap();
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_movement_metrics() {
        let record = row(&[
            ("id", text("1")),
            ("Opening", text("(10)")),
            ("Dr", text("5")),
            ("Credit", text("2.5")),
            ("Balance", text("-7.5")),
        ])
        .into_record::<MovementMetrics>()
        .unwrap();
        assert_eq!(record.own_metrics, movement(-10.0, 5.0, 2.5, -7.5));
    }

    #[test]
    fn test_bad_amount_fails() {
        let result = row(&[("id", text("1")), ("openingDebit", text("lots"))])
            .into_record::<OpeningClosingMetrics>();
        assert!(result.is_err());
    }

    #[test]
    fn test_boolean_amount_fails() {
        let result = row(&[("id", text("1")), ("closingCredit", RawValue::Bool(true))])
            .into_record::<OpeningClosingMetrics>();
        assert!(result.is_err());
    }
}
