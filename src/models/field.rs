use std::collections::BTreeSet;

pub const Q: &str = "q";
pub const SENTIMENT: &str = "sentiment";
pub const PRODUCT: &str = "product";
pub const PLATFORM: &str = "platform";
pub const VERSION: &str = "version";
pub const SHOW_ONE_OFFS: &str = "show_one_offs";
pub const PAGE: &str = "page";
pub const SITE: &str = "site";
pub const CLUSTER: &str = "cluster";

/// Every request key the search form understands.
pub const RECOGNIZED_KEYS: [&str; 9] = [
    Q,
    SENTIMENT,
    PRODUCT,
    PLATFORM,
    VERSION,
    SHOW_ONE_OFFS,
    PAGE,
    SITE,
    CLUSTER,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Boolean,
    Integer,
    Choice,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text value",
            FieldKind::Boolean => "boolean",
            FieldKind::Integer => "integer",
            FieldKind::Choice => "choice",
        }
    }
}

/// A typed field value. Choice fields carry `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Int(Option<i64>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<Option<i64>> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
    /// Allowed keys; only set for choice fields.
    pub choices: Option<BTreeSet<String>>,
}

impl FieldDefinition {
    pub fn text(name: &'static str, default: &str) -> Self {
        Self {
            name,
            kind: FieldKind::Text,
            default: FieldValue::Text(default.to_string()),
            choices: None,
        }
    }

    pub fn choice<I, S>(name: &'static str, default: &str, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            kind: FieldKind::Choice,
            default: FieldValue::Text(default.to_string()),
            choices: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: FieldKind::Boolean,
            default: FieldValue::Bool(default),
            choices: None,
        }
    }

    pub fn integer(name: &'static str, default: Option<i64>) -> Self {
        Self {
            name,
            kind: FieldKind::Integer,
            default: FieldValue::Int(default),
            choices: None,
        }
    }

    /// Whether `key` is one of this field's allowed choices.
    pub fn allows(&self, key: &str) -> bool {
        self.choices
            .as_ref()
            .map_or(false, |choices| choices.contains(key))
    }
}

/// The ordered set of statically configured fields of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDefinitions {
    fields: Vec<FieldDefinition>,
}

impl FieldDefinitions {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|def| def.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn default_of(&self, name: &str) -> Option<&FieldValue> {
        self.get(name).map(|def| &def.default)
    }
}
