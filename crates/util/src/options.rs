use serde::{Deserialize, Serialize};

/// How record properties are compared once both sides are structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Compare property values only.
    #[default]
    Value,
    /// Compare full descriptors: `configurable`, `enumerable`, `writable`,
    /// the stored value, and the getter and setter by source text.
    Descriptor,
}

/// Options for [`try_deep_equal`](crate::equal::try_deep_equal).
///
/// # Examples
///
/// ```
/// use replica_util::{Comparison, EqualOptions};
///
/// let opts: EqualOptions = serde_json::from_str(r#"{"comparison": "descriptor"}"#).unwrap();
/// assert_eq!(opts.comparison, Comparison::Descriptor);
/// assert_eq!(opts.max_depth, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EqualOptions {
    pub comparison: Comparison,
    /// Deepest object nesting to descend into; the root object is depth 0.
    pub max_depth: Option<usize>,
}

impl EqualOptions {
    pub fn strict() -> Self {
        Self {
            comparison: Comparison::Descriptor,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Options for [`deep_clone_with`](crate::clone::deep_clone_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloneOptions {
    /// Deepest object nesting to copy; the root object is depth 0.
    pub max_depth: Option<usize>,
}

impl CloneOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EqualOptions::default();
        assert_eq!(opts.comparison, Comparison::Value);
        assert_eq!(opts.max_depth, None);
        assert_eq!(CloneOptions::default().max_depth, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: EqualOptions = serde_json::from_str(r#"{"maxDepth": 4}"#).unwrap();
        assert_eq!(opts, EqualOptions::default().with_max_depth(4));

        let opts: CloneOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, CloneOptions::default());
    }

    #[test]
    fn test_serialize_roundtrip_names() {
        let json = serde_json::to_value(EqualOptions::strict()).unwrap();
        assert_eq!(json, serde_json::json!({"comparison": "descriptor", "maxDepth": null}));
    }

    #[test]
    fn test_unknown_comparison_rejected() {
        let res: Result<EqualOptions, _> = serde_json::from_str(r#"{"comparison": "loose"}"#);
        assert!(res.is_err());
    }
}
