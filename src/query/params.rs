// Query string parameter module
// Decodes the URL query string and coerces individual parameters

use std::num::IntErrorKind;

use thiserror::Error;

/// Query parameter errors, reported to the client as 400
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{param}: expected an integer, got '{value}'")]
    InvalidInteger { param: &'static str, value: String },
    #[error("malformed query string: {0}")]
    Malformed(String),
}

impl QueryError {
    /// Name of the offending parameter, if the error concerns one
    pub const fn param(&self) -> Option<&'static str> {
        match self {
            Self::InvalidInteger { param, .. } => Some(param),
            Self::Malformed(_) => None,
        }
    }
}

/// Decoded query string
///
/// Keeps every pair in request order; lookups return the last occurrence.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Decode a raw query string (without leading `?`)
    pub fn parse(query: Option<&str>) -> Result<Self, QueryError> {
        let Some(raw) = query else {
            return Ok(Self::default());
        };
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(raw)
            .map_err(|e| QueryError::Malformed(e.to_string()))?;
        Ok(Self { pairs })
    }

    fn last(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text parameter; an empty value counts as absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.last(name)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    /// Integer parameter
    ///
    /// Surrounding whitespace is ignored. Values beyond the `i64` range
    /// saturate to `i64::MIN` / `i64::MAX` instead of failing.
    pub fn integer(&self, name: &'static str) -> Result<Option<i64>, QueryError> {
        self.last(name)
            .map(|value| match value.trim().parse::<i64>() {
                Ok(n) => Ok(n),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Ok(i64::MAX),
                    IntErrorKind::NegOverflow => Ok(i64::MIN),
                    _ => Err(QueryError::InvalidInteger {
                        param: name,
                        value: value.to_string(),
                    }),
                },
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_none() {
        let params = QueryParams::parse(None).unwrap();
        assert_eq!(params.text("name"), None);
        assert_eq!(params.integer("age_min"), Ok(None));
    }

    #[test]
    fn test_parse_percent_encoded_text() {
        // "김철수" percent-encoded as UTF-8
        let params = QueryParams::parse(Some(
            "name=%EA%B9%80%EC%B2%A0%EC%88%98&address=%EC%84%9C%EC%9A%B8+%EC%8B%9C",
        ))
        .unwrap();
        assert_eq!(params.text("name").as_deref(), Some("김철수"));
        assert_eq!(params.text("address").as_deref(), Some("서울 시"));
    }

    #[test]
    fn test_empty_text_is_absent() {
        let params = QueryParams::parse(Some("name=&address=x")).unwrap();
        assert_eq!(params.text("name"), None);
        assert_eq!(params.text("address").as_deref(), Some("x"));
    }

    #[test]
    fn test_integer_values() {
        let params = QueryParams::parse(Some("age_min=30&age_max=-1")).unwrap();
        assert_eq!(params.integer("age_min"), Ok(Some(30)));
        assert_eq!(params.integer("age_max"), Ok(Some(-1)));
        assert_eq!(params.integer("price_min"), Ok(None));
    }

    #[test]
    fn test_integer_coercion_failure() {
        let params = QueryParams::parse(Some("age_min=thirty")).unwrap();
        let err = params.integer("age_min").unwrap_err();
        assert_eq!(err.param(), Some("age_min"));
        assert_eq!(err.to_string(), "age_min: expected an integer, got 'thirty'");
    }

    #[test]
    fn test_integer_out_of_range_saturates() {
        let params = QueryParams::parse(Some(
            "age_min=99999999999999999999&age_max=-99999999999999999999",
        ))
        .unwrap();
        assert_eq!(params.integer("age_min"), Ok(Some(i64::MAX)));
        assert_eq!(params.integer("age_max"), Ok(Some(i64::MIN)));
    }

    #[test]
    fn test_integer_surrounding_whitespace() {
        let params = QueryParams::parse(Some("age_min=%2030&age_max=35+")).unwrap();
        assert_eq!(params.integer("age_min"), Ok(Some(30)));
        assert_eq!(params.integer("age_max"), Ok(Some(35)));

        let params = QueryParams::parse(Some("age_min=+")).unwrap();
        assert_eq!(params.integer("age_min").unwrap_err().param(), Some("age_min"));
    }

    #[test]
    fn test_repeated_parameter_last_wins() {
        let params = QueryParams::parse(Some("age_min=10&age_min=40")).unwrap();
        assert_eq!(params.integer("age_min"), Ok(Some(40)));
    }
}
