use crate::entities::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde_derive::Serialize)]
pub struct AccountId(pub i64);

/// Account code as supplied by the source. Numeric codes sort numerically,
/// everything else sorts lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde_derive::Serialize)]
pub struct AccountCode(pub String);

/// Reference from a record to its parent, resolved by id first and by code
/// second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Root,
    Ref(String),
}

/// One flat account row, as delivered by the source and before any tree is
/// built. Immutable for the lifetime of a load.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord<M: Metrics> {
    /// None when the source row did not carry a usable id. Such a record is
    /// still placed in the tree but cannot be edited.
    pub id: Option<AccountId>,
    pub code: AccountCode,
    pub name: String,
    pub parent: ParentRef,
    pub own_metrics: M,
    pub is_control: bool,
    pub is_active: bool,
}

// --

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for AccountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AccountCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn as_number(&self) -> Option<i128> {
        self.0.trim().parse::<i128>().ok()
    }
}

impl ParentRef {
    /// Blank, zero and missing references all denote a root.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some("0") => ParentRef::Root,
            Some(s) if s.eq_ignore_ascii_case("null") => ParentRef::Root,
            Some(s) => ParentRef::Ref(s.to_string()),
        }
    }

    pub(crate) fn as_id(&self) -> Option<AccountId> {
        match self {
            ParentRef::Root => None,
            ParentRef::Ref(s) => s.parse::<i64>().ok().map(AccountId),
        }
    }

    pub(crate) fn as_code(&self) -> Option<&str> {
        match self {
            ParentRef::Root => None,
            ParentRef::Ref(s) => Some(s),
        }
    }
}

impl<M: Metrics> AccountRecord<M> {
    pub fn new(id: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(AccountId(id)),
            code: AccountCode(code.into()),
            name: name.into(),
            parent: ParentRef::Root,
            own_metrics: M::zero(),
            is_control: false,
            is_active: true,
        }
    }

    pub fn with_parent(mut self, parent: impl std::fmt::Display) -> Self {
        self.parent = ParentRef::parse(Some(&parent.to_string()));
        self
    }

    pub fn with_metrics(mut self, metrics: M) -> Self {
        self.own_metrics = metrics;
        self
    }

    pub fn control(mut self) -> Self {
        self.is_control = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}
