use serde_json::{Value, json};

/// Largest page size the store accepts in a single listing.
pub const MAX_LIMIT: usize = 5000;

/// Page size applied when a listing carries no explicit limit.
pub const DEFAULT_LIMIT: usize = 25;

/// A single listing constraint, modelled on the Appwrite query language.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal { attribute: String, values: Vec<Value> },
    OrderDesc { attribute: String },
    Limit(usize),
}

impl Query {
    pub fn equal(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equal {
            attribute: attribute.into(),
            values: vec![value.into()],
        }
    }

    pub fn order_desc(attribute: impl Into<String>) -> Self {
        Self::OrderDesc {
            attribute: attribute.into(),
        }
    }

    #[must_use]
    pub const fn limit(limit: usize) -> Self {
        Self::Limit(limit)
    }

    /// JSON encoding expected by the `queries[]` parameter.
    #[must_use]
    pub fn to_appwrite(&self) -> String {
        let value = match self {
            Self::Equal { attribute, values } => json!({
                "method": "equal",
                "attribute": attribute,
                "values": values,
            }),
            Self::OrderDesc { attribute } => json!({
                "method": "orderDesc",
                "attribute": attribute,
            }),
            Self::Limit(limit) => json!({
                "method": "limit",
                "values": [limit],
            }),
        };

        value.to_string()
    }

    /// Effective limit of a query list: the last `Limit` wins.
    #[must_use]
    pub fn effective_limit(queries: &[Self]) -> usize {
        queries
            .iter()
            .rev()
            .find_map(|q| match q {
                Self::Limit(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT)
    }
}
