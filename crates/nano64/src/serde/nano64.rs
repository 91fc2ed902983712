use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Nano64;

pub mod as_hex {
    use super::*;

    pub fn serialize<S>(id: &Nano64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_hex())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Nano64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl serde::de::Visitor<'_> for HexVisitor {
            type Value = Nano64;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 16-digit hex encoded Nano64")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Nano64::from_hex(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(HexVisitor)
    }
}

pub mod as_native {
    use super::*;

    pub fn serialize<S>(id: &Nano64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Nano64, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Nano64::from_raw)
    }
}

pub mod as_signed {
    use super::*;

    pub fn serialize<S>(id: &Nano64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_signed().serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Nano64, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(Nano64::from_signed)
    }
}

pub mod as_hex_option {
    use super::*;

    pub fn serialize<S>(id: &Option<Nano64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_hex()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Nano64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionVisitor;

        impl<'de> serde::de::Visitor<'de> for OptionVisitor {
            type Value = Option<Nano64>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a hex encoded Nano64 or null")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, d: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                super::as_hex::deserialize(d).map(Some)
            }
        }

        d.deserialize_option(OptionVisitor)
    }
}

pub mod as_native_option {
    use super::*;

    pub fn serialize<S>(id: &Option<Nano64>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.map(|id| id.to_raw()).serialize(s)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Nano64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<u64>::deserialize(d).map(|raw| raw.map(Nano64::from_raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nano64 {
        Nano64::from_raw(0x18C_D6A5_2B3C_ABCDE)
    }

    #[test]
    fn hex_field_round_trips() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_hex")]
            event_id: Nano64,
        }
        let row = Row { event_id: sample() };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":"18CD6A52B3C-ABCDE"}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);

        let lower: Row = serde_json::from_str(r#"{"event_id":"0x18cd6a52b3cabcde"}"#)
            .expect("deserialize lenient hex");
        assert_eq!(lower, row);
    }

    #[test]
    fn hex_field_rejects_garbage() {
        #[derive(Debug, Deserialize)]
        struct Row {
            #[serde(with = "as_hex")]
            #[allow(dead_code)]
            event_id: Nano64,
        }
        let err = serde_json::from_str::<Row>(r#"{"event_id":"18CD6A52B3C-ABCD"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid hex length"));
        assert!(serde_json::from_str::<Row>(r#"{"event_id":42}"#).is_err());
    }

    #[test]
    fn native_field_round_trips() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_native")]
            event_id: Nano64,
        }
        let row = Row {
            event_id: Nano64::from_raw(42),
        };

        let json = serde_json::to_string(&row).expect("serialize");
        assert_eq!(json, r#"{"event_id":42}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, row);

        let max = Row { event_id: Nano64::MAX };
        let json = serde_json::to_string(&max).expect("serialize");
        assert_eq!(json, r#"{"event_id":18446744073709551615}"#);
    }

    #[test]
    fn signed_field_round_trips() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_signed")]
            event_id: Nano64,
        }
        for (id, expected) in [
            (Nano64::NIL, r#"{"event_id":-9223372036854775808}"#),
            (Nano64::from_raw(1 << 63), r#"{"event_id":0}"#),
            (Nano64::MAX, r#"{"event_id":9223372036854775807}"#),
        ] {
            let row = Row { event_id: id };
            let json = serde_json::to_string(&row).expect("serialize");
            assert_eq!(json, expected);
            let back: Row = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, row);
        }
    }

    #[test]
    fn optional_fields_round_trip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_hex_option")]
            parent: Option<Nano64>,
            #[serde(with = "as_native_option")]
            sibling: Option<Nano64>,
        }

        let empty = Row {
            parent: None,
            sibling: None,
        };
        let json = serde_json::to_string(&empty).expect("serialize");
        assert_eq!(json, r#"{"parent":null,"sibling":null}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, empty);

        let full = Row {
            parent: Some(sample()),
            sibling: Some(Nano64::from_raw(7)),
        };
        let json = serde_json::to_string(&full).expect("serialize");
        assert_eq!(json, r#"{"parent":"18CD6A52B3C-ABCDE","sibling":7}"#);
        let back: Row = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, full);
    }
}
