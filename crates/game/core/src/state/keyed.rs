//! Tagged encoding for map-typed fields.
//!
//! Maps are written as `{"dataType":"Map","value":[[key,value],...]}` so a
//! decoder rebuilds lookup-by-key semantics instead of a plain record, and so
//! non-string keys survive formats like JSON. Use with
//! `#[serde(with = "keyed")]` on a `BTreeMap` field.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const MAP_TAG: &str = "Map";

#[derive(Serialize)]
struct TaggedRef<'a, K, V> {
    #[serde(rename = "dataType")]
    data_type: &'static str,
    value: Vec<(&'a K, &'a V)>,
}

#[derive(Deserialize)]
struct Tagged<K, V> {
    #[serde(rename = "dataType")]
    data_type: String,
    value: Vec<(K, V)>,
}

pub fn serialize<K, V, S>(map: &BTreeMap<K, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    TaggedRef {
        data_type: MAP_TAG,
        value: map.iter().collect(),
    }
    .serialize(serializer)
}

pub fn deserialize<'de, K, V, D>(deserializer: D) -> Result<BTreeMap<K, V>, D::Error>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
    D: Deserializer<'de>,
{
    let tagged = Tagged::<K, V>::deserialize(deserializer)?;
    if tagged.data_type != MAP_TAG {
        return Err(D::Error::custom(format!(
            "expected dataType \"{MAP_TAG}\", found \"{}\"",
            tagged.data_type
        )));
    }

    let mut map = BTreeMap::new();
    for (key, value) in tagged.value {
        if map.insert(key, value).is_some() {
            return Err(D::Error::custom("duplicate key in keyed map"));
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super")]
        map: BTreeMap<u8, String>,
    }

    #[test]
    fn encodes_as_tagged_pairs() {
        let holder = Holder {
            map: BTreeMap::from([(2, "b".to_string()), (1, "a".to_string())]),
        };
        let json = serde_json::to_string(&holder).unwrap();
        assert_eq!(json, r#"{"map":{"dataType":"Map","value":[[1,"a"],[2,"b"]]}}"#);
        assert_eq!(serde_json::from_str::<Holder>(&json).unwrap(), holder);
    }

    #[test]
    fn rejects_wrong_tag_and_duplicates() {
        let wrong_tag = r#"{"map":{"dataType":"Set","value":[[1,"a"]]}}"#;
        assert!(serde_json::from_str::<Holder>(wrong_tag).is_err());

        let duplicate = r#"{"map":{"dataType":"Map","value":[[1,"a"],[1,"b"]]}}"#;
        let error = serde_json::from_str::<Holder>(duplicate).unwrap_err();
        assert!(error.to_string().contains("duplicate key"));

        let untagged = r#"{"map":{"1":"a"}}"#;
        assert!(serde_json::from_str::<Holder>(untagged).is_err());
    }
}
