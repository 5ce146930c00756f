//! Serde helpers for SurrealDB RecordId
//!
//! 支持从字符串格式 "table:id" 反序列化为 RecordId，
//! 同时兼容 SurrealDB 原生格式和 JSON 字符串格式。
//! 序列化统一输出 "table:id" 字符串，方便 API 客户端使用。

use serde::{Deserialize, Deserializer, Serializer, de};
use std::fmt;
use surrealdb::RecordId;

fn parse_record_id<E: de::Error>(s: &str) -> Result<RecordId, E> {
    if let Some((tb, key)) = s.split_once(':') {
        Ok(RecordId::from_table_key(tb, key))
    } else {
        Err(E::custom(format!("expected 'table:id', got '{}'", s)))
    }
}

struct RecordIdVisitor;

impl<'de> de::Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a RecordId or a string like 'table:id'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_record_id(v)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        // 委托给 RecordId 的默认反序列化
        RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        RecordId::deserialize(deserializer)
    }
}

/// 序列化 RecordId 为 "table:id" 字符串
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &RecordId, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Option<RecordId> 的序列化/反序列化
pub mod option_record_id {
    use super::*;

    struct OptionVisitor;

    impl<'de> de::Visitor<'de> for OptionVisitor {
        type Value = Option<RecordId>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null, a RecordId, or a string like 'table:id'")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(RecordIdVisitor).map(Some)
        }
    }

    pub fn serialize<S>(id: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(default, with = "option_record_id")]
        id: Option<RecordId>,
    }

    #[test]
    fn test_serialize_as_string() {
        let w = Wrapper {
            id: Some(RecordId::from_table_key("dining_table", "abc123")),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, r#"{"id":"dining_table:abc123"}"#);
    }

    #[test]
    fn test_deserialize_from_string() {
        let w: Wrapper = serde_json::from_str(r#"{"id":"order:xyz"}"#).unwrap();
        let id = w.id.unwrap();
        assert_eq!(id.table(), "order");
        assert_eq!(id.key().to_string(), "xyz");
    }

    #[test]
    fn test_deserialize_missing_and_null() {
        let w: Wrapper = serde_json::from_str("{}").unwrap();
        assert!(w.id.is_none());
        let w: Wrapper = serde_json::from_str(r#"{"id":null}"#).unwrap();
        assert!(w.id.is_none());
    }

    #[test]
    fn test_bad_string_rejected() {
        let res: Result<Wrapper, _> = serde_json::from_str(r#"{"id":"no-colon"}"#);
        assert!(res.is_err());
    }
}
