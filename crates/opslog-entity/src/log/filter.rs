//! Filter types for dynamic log retrieval.

use serde::Deserialize;

/// Sentinel `type` value meaning "no type filter".
const TYPE_ANY: &str = "all";

/// Tokens treated as true for the `success` filter. Any other supplied
/// value filters for false — deliberately asymmetric with the numeric
/// filters, which are dropped when unparseable.
const TRUTHY_TOKENS: [&str; 3] = ["1", "true", "yes"];

/// Log list query parameters exactly as received on the wire.
///
/// Every field is optional and arrives as text; [`LogFilter::from_query`]
/// applies the coercion rules.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLogQuery {
    /// Timestamp substring.
    pub datetime: Option<String>,
    /// Exact operation type, or `"all"` for no filter.
    #[serde(rename = "type")]
    pub log_type: Option<String>,
    /// Input path substring.
    pub input: Option<String>,
    /// Output path substring.
    pub output: Option<String>,
    /// Inclusive lower size bound.
    pub min_size: Option<String>,
    /// Inclusive upper size bound.
    pub max_size: Option<String>,
    /// Success flag filter.
    pub success: Option<String>,
    /// Row cap.
    pub limit: Option<String>,
}

/// Typed, validated filter criteria. All present criteria are ANDed.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    /// Substring match against the stored timestamp string.
    pub datetime: Option<String>,
    /// Exact match on the operation type.
    pub log_type: Option<String>,
    /// Substring match on the input path.
    pub input: Option<String>,
    /// Substring match on the output path.
    pub output: Option<String>,
    /// Inclusive lower bound on size.
    pub min_size: Option<i64>,
    /// Inclusive upper bound on size.
    pub max_size: Option<i64>,
    /// Success flag match.
    pub success: Option<bool>,
    /// Maximum number of rows returned, applied after ordering.
    pub limit: Option<i64>,
}

impl LogFilter {
    /// Coerce raw query parameters into typed criteria.
    ///
    /// Empty strings and the `type=all` sentinel count as absent. The
    /// numeric filters parse-or-drop: an unparseable `min_size`,
    /// `max_size`, or `limit` behaves as if it were never supplied. A
    /// supplied `success` always filters; only the truthy tokens map to
    /// true.
    pub fn from_query(raw: RawLogQuery) -> Self {
        Self {
            datetime: non_empty(raw.datetime),
            log_type: non_empty(raw.log_type).filter(|t| t != TYPE_ANY),
            input: non_empty(raw.input),
            output: non_empty(raw.output),
            min_size: parse_or_drop(raw.min_size),
            max_size: parse_or_drop(raw.max_size),
            success: raw
                .success
                .map(|s| TRUTHY_TOKENS.contains(&s.to_lowercase().as_str())),
            limit: parse_or_drop(raw.limit),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn parse_or_drop(value: Option<String>) -> Option<i64> {
    value.and_then(|s| s.trim().parse::<i64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_empty_filter() {
        let filter = LogFilter::from_query(RawLogQuery::default());
        assert!(filter.datetime.is_none());
        assert!(filter.log_type.is_none());
        assert!(filter.success.is_none());
        assert!(filter.limit.is_none());
    }

    #[test]
    fn type_all_sentinel_is_ignored() {
        let filter = LogFilter::from_query(RawLogQuery {
            log_type: Some("all".to_string()),
            ..Default::default()
        });
        assert!(filter.log_type.is_none());

        let filter = LogFilter::from_query(RawLogQuery {
            log_type: Some("HASH".to_string()),
            ..Default::default()
        });
        assert_eq!(filter.log_type.as_deref(), Some("HASH"));
    }

    #[test]
    fn unparseable_numeric_filters_are_dropped() {
        let filter = LogFilter::from_query(RawLogQuery {
            min_size: Some("x".to_string()),
            max_size: Some("20".to_string()),
            limit: Some("ten".to_string()),
            ..Default::default()
        });
        assert!(filter.min_size.is_none());
        assert_eq!(filter.max_size, Some(20));
        assert!(filter.limit.is_none());
    }

    #[test]
    fn success_filter_is_asymmetric() {
        for token in ["1", "true", "yes", "TRUE"] {
            let filter = LogFilter::from_query(RawLogQuery {
                success: Some(token.to_string()),
                ..Default::default()
            });
            assert_eq!(filter.success, Some(true), "token {token}");
        }

        // Anything else supplied filters for false instead of being dropped.
        for token in ["0", "false", "no", "banana"] {
            let filter = LogFilter::from_query(RawLogQuery {
                success: Some(token.to_string()),
                ..Default::default()
            });
            assert_eq!(filter.success, Some(false), "token {token}");
        }
    }
}
