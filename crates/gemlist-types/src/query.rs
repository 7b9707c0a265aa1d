use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value of one listing API parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(u64),
    Number(f64),
    Text(String),
    /// Structured IN set: `{"in": [...]}`
    InSet {
        #[serde(rename = "in")]
        values: Vec<String>,
    },
    /// Operator bounds: `{"gte": x, "lte": y}`, either side optional
    Bounds {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gte: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lte: Option<f64>,
    },
}

impl ParamValue {
    pub fn text(value: impl Into<String>) -> Self {
        ParamValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading of scalar values (numbers or numeric text)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(n) => Some(*n as f64),
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok().filter(|n: &f64| n.is_finite()),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ParamValue::Integer(n) => Some(*n),
            ParamValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 => Some(*n as u64),
            ParamValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ParamValue::Integer(n) => Value::from(*n),
            ParamValue::Number(n) => number_json(*n),
            ParamValue::Text(s) => Value::String(s.clone()),
            ParamValue::InSet { values } => {
                let mut map = serde_json::Map::new();
                map.insert("in".to_string(), Value::from(values.clone()));
                Value::Object(map)
            }
            ParamValue::Bounds { gte, lte } => {
                let mut map = serde_json::Map::new();
                if let Some(gte) = gte {
                    map.insert("gte".to_string(), number_json(*gte));
                }
                if let Some(lte) = lte {
                    map.insert("lte".to_string(), number_json(*lte));
                }
                Value::Object(map)
            }
        }
    }
}

fn number_json(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Render a number the way it appears in a query string (`2` not `2.0`)
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}

/// Flat parameter bag sent to a listing endpoint.
///
/// Keys are unique; two bags are equal when they hold the same key/value
/// pairs regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, ParamValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) -> Option<ParamValue> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten into URL query pairs.
    ///
    /// Structured values use bracket keys: `shape[in]=Round,Oval`,
    /// `price[gte]=100`, `price[lte]=900`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                ParamValue::Integer(n) => pairs.push((key.clone(), n.to_string())),
                ParamValue::Number(n) => pairs.push((key.clone(), format_number(*n))),
                ParamValue::Text(s) => pairs.push((key.clone(), s.clone())),
                ParamValue::InSet { values } => {
                    pairs.push((format!("{}[in]", key), values.join(",")))
                }
                ParamValue::Bounds { gte, lte } => {
                    if let Some(gte) = gte {
                        pairs.push((format!("{}[gte]", key), format_number(*gte)));
                    }
                    if let Some(lte) = lte {
                        pairs.push((format!("{}[lte]", key), format_number(*lte)));
                    }
                }
            }
        }
        pairs
    }

    /// Percent-encoded query string (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }

    /// JSON object used as a POST body
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, ParamValue)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for QueryParams {
    type Item = (String, ParamValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, ParamValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("page", ParamValue::Integer(2));
        params.insert(
            "shape",
            ParamValue::InSet {
                values: vec!["Round".to_string(), "Oval".to_string()],
            },
        );
        params.insert(
            "price",
            ParamValue::Bounds {
                gte: Some(100.0),
                lte: None,
            },
        );
        params.insert("caratWeightMax", ParamValue::Number(2.5));
        params.insert("search", ParamValue::text("blue & white"));
        params
    }

    #[test]
    fn test_query_pairs() {
        let pairs = sample().to_query_pairs();
        assert!(pairs.contains(&("shape[in]".to_string(), "Round,Oval".to_string())));
        assert!(pairs.contains(&("price[gte]".to_string(), "100".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "price[lte]"));
        assert!(pairs.contains(&("caratWeightMax".to_string(), "2.5".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
    }

    #[test]
    fn test_query_string_is_encoded() {
        let mut params = QueryParams::new();
        params.insert("search", ParamValue::text("blue & white"));
        insta::assert_snapshot!(params.to_query_string(), @"search=blue+%26+white");
    }

    #[test]
    fn test_json_body() {
        assert_eq!(
            sample().to_json(),
            json!({
                "page": 2,
                "shape": {"in": ["Round", "Oval"]},
                "price": {"gte": 100.0},
                "caratWeightMax": 2.5,
                "search": "blue & white"
            })
        );
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut a = QueryParams::new();
        a.insert("a", ParamValue::Integer(1));
        a.insert("b", ParamValue::text("x"));
        let mut b = QueryParams::new();
        b.insert("b", ParamValue::text("x"));
        b.insert("a", ParamValue::Integer(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_untagged_deserialize() {
        let params: QueryParams = serde_json::from_value(json!({
            "limit": 20,
            "shape": {"in": ["Round"]},
            "price": {"lte": 900},
            "color": "D,E"
        }))
        .unwrap();
        assert_eq!(params.get("limit"), Some(&ParamValue::Integer(20)));
        assert_eq!(
            params.get("shape"),
            Some(&ParamValue::InSet {
                values: vec!["Round".to_string()]
            })
        );
        assert_eq!(
            params.get("price"),
            Some(&ParamValue::Bounds {
                gte: None,
                lte: Some(900.0)
            })
        );
        assert_eq!(params.get("color").and_then(|v| v.as_str()), Some("D,E"));
    }
}
