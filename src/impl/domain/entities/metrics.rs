use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde_derive::Serialize, serde_derive::Deserialize)]
pub enum MetricField {
    OpeningDebit,
    OpeningCredit,
    ClosingDebit,
    ClosingCredit,
    Opening,
    Debit,
    Credit,
    Balance,
}

impl MetricField {
    pub fn label(&self) -> &'static str {
        match self {
            MetricField::OpeningDebit => "Opening Dr",
            MetricField::OpeningCredit => "Opening Cr",
            MetricField::ClosingDebit => "Closing Dr",
            MetricField::ClosingCredit => "Closing Cr",
            MetricField::Opening => "Opening",
            MetricField::Debit => "Debit",
            MetricField::Credit => "Credit",
            MetricField::Balance => "Balance",
        }
    }
}

impl std::fmt::Display for MetricField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Fixed set of numeric values carried by every account row of a report.
///
/// The rollup engine is generic over this trait, so the same aggregation and
/// display rules serve every report layout. Values are summed exactly as
/// given; rounding is left to presentation.
pub trait Metrics:
    Copy + Default + PartialEq + std::fmt::Debug + Add<Output = Self> + AddAssign + Send + Sync + 'static
{
    /// All fields of the layout, in display order.
    const FIELDS: &'static [MetricField];

    /// Fields that can be changed through an opening balance edit.
    const EDITABLE: &'static [MetricField];

    fn get(&self, field: MetricField) -> Option<f64>;

    /// Returns false if the field does not belong to this layout.
    fn set(&mut self, field: MetricField, value: f64) -> bool;

    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Opening and closing balances split by side (chart of accounts, trial
/// balance).
#[derive(Debug, Clone, Copy, Default, PartialEq, serde_derive::Serialize)]
pub struct OpeningClosingMetrics {
    pub opening_debit: f64,
    pub opening_credit: f64,
    pub closing_debit: f64,
    pub closing_credit: f64,
}

/// Opening balance plus period movement (general ledger).
#[derive(Debug, Clone, Copy, Default, PartialEq, serde_derive::Serialize)]
pub struct MovementMetrics {
    pub opening: f64,
    pub debit: f64,
    pub credit: f64,
    pub balance: f64,
}

macro_rules! impl_metrics {
    ($typ:ident, editable: [$($editable:ident),*], { $($variant:ident => $field:ident),* $(,)? }) => {
        impl Metrics for $typ {
            const FIELDS: &'static [MetricField] = &[$(MetricField::$variant),*];
            const EDITABLE: &'static [MetricField] = &[$(MetricField::$editable),*];

            fn get(&self, field: MetricField) -> Option<f64> {
                match field {
                    $(MetricField::$variant => Some(self.$field),)*
                    _ => None,
                }
            }

            fn set(&mut self, field: MetricField, value: f64) -> bool {
                match field {
                    $(MetricField::$variant => {
                        self.$field = value;
                        true
                    })*
                    _ => false,
                }
            }
        }

        impl Add for $typ {
            type Output = $typ;
            fn add(self, rhs: $typ) -> $typ {
                $typ {
                    $($field: self.$field + rhs.$field,)*
                }
            }
        }

        impl AddAssign for $typ {
            fn add_assign(&mut self, rhs: $typ) {
                $(self.$field += rhs.$field;)*
            }
        }
    };
}

impl_metrics!(OpeningClosingMetrics, editable: [OpeningDebit, OpeningCredit], {
    OpeningDebit => opening_debit,
    OpeningCredit => opening_credit,
    ClosingDebit => closing_debit,
    ClosingCredit => closing_credit,
});

impl_metrics!(MovementMetrics, editable: [Opening], {
    Opening => opening,
    Debit => debit,
    Credit => credit,
    Balance => balance,
});

// Shorthand constructors.

pub fn opening_closing(
    opening_debit: f64,
    opening_credit: f64,
    closing_debit: f64,
    closing_credit: f64,
) -> OpeningClosingMetrics {
    OpeningClosingMetrics {
        opening_debit,
        opening_credit,
        closing_debit,
        closing_credit,
    }
}

pub fn movement(opening: f64, debit: f64, credit: f64, balance: f64) -> MovementMetrics {
    MovementMetrics {
        opening,
        debit,
        credit,
        balance,
    }
}
