use fractic_server_error::{define_client_error, define_internal_error};

use crate::entities::{MetricField, NodeId};

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(
    AccountRowsLoadFailed,
    "Failed to load account rows: {details}.",
    { details: &str }
);

// Parsing-related.
define_client_error!(InvalidCsv, "Invalid CSV format.");
define_client_error!(InvalidJson, "Invalid JSON format: {details}.", { details: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(
    InvalidAccountingAmount,
    "Invalid accounting amount: '{value}'.",
    { value: &str }
);
define_client_error!(
    InvalidReportConfig,
    "Invalid report configuration: {details}.",
    { details: &str }
);

// Opening balance edits.
define_client_error!(
    EditTargetNotFound,
    "Cannot edit opening balance: node {node} does not exist in the current tree.",
    { node: &NodeId }
);
define_client_error!(
    EditTargetNotLeaf,
    "Cannot edit opening balance of '{code}': only accounts without sub-accounts can be edited directly.",
    { code: &str }
);
define_client_error!(
    EditTargetHasNoId,
    "Cannot edit opening balance of '{code}': the account has no id to persist against.",
    { code: &str }
);
define_client_error!(EditEmpty, "Opening balance edit does not contain any values.");
define_client_error!(
    EditFieldNotEditable,
    "Field '{field}' is not an editable opening balance field for this report.",
    { field: &MetricField }
);
define_client_error!(
    EditInvalidValue,
    "Invalid value {value} for '{field}': opening balances must be finite and non-negative.",
    { field: &MetricField, value: f64 }
);
define_internal_error!(
    OpeningBalancePersistFailed,
    "Failed to save opening balance for account '{code}'. The previous value has been restored.",
    { code: &str }
);
