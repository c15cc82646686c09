//! # Representable Enums
//!
//! Closed sets that travel as an integer code in the built dialect and as a
//! lowercase string token in the non-built dialect.
//!
//! Token parsing is case-insensitive (`"ACTION"`, `"Action"` and `"action"`
//! all name the same member); rendering always produces the canonical
//! lowercase token.
//!
//! Enums are declared through [`representable_enum!`](crate::representable_enum),
//! which serializes the enum itself as its token. Built structs opt into the
//! integer form per field with `#[serde(with = "mp_core::enums::code")]`.

use crate::error::ConversionError;

/// An enum with a stable integer code and a stable string token per member.
pub trait RepresentableEnum: Copy + Eq + Sized + 'static {
    /// Type name used in conversion errors.
    const NAME: &'static str;

    /// Every member, in declaration order.
    fn members() -> &'static [Self];

    /// Built-dialect code.
    fn code(self) -> i64;

    /// Non-built-dialect token.
    fn as_str(self) -> &'static str;

    /// All tokens, in declaration order.
    fn values() -> Vec<&'static str> {
        Self::members().iter().map(|m| m.as_str()).collect()
    }

    /// Parse a non-built token, ignoring ASCII case.
    fn from_string(token: &str) -> Result<Self, ConversionError> {
        Self::members()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ConversionError::UnknownToken {
                enum_name: Self::NAME,
                value: token.to_string(),
            })
    }

    /// Parse a built code.
    fn from_code(code: i64) -> Result<Self, ConversionError> {
        Self::members()
            .iter()
            .copied()
            .find(|m| m.code() == code)
            .ok_or(ConversionError::UnknownCode {
                enum_name: Self::NAME,
                code,
            })
    }
}

/// True when no two members of `E` share a code or a token.
pub fn has_unique_members<E: RepresentableEnum>() -> bool {
    let members = E::members();
    members.iter().enumerate().all(|(i, a)| {
        members[i + 1..]
            .iter()
            .all(|b| a.code() != b.code() && !a.as_str().eq_ignore_ascii_case(b.as_str()))
    })
}

/// Declare a [`RepresentableEnum`] with its codes and tokens.
///
/// ```
/// mp_core::representable_enum! {
///     /// How a trigger combines its conditions.
///     pub enum LogicalOperator {
///         And = 0 => "and",
///         Or = 1 => "or",
///     }
/// }
///
/// use mp_core::RepresentableEnum;
/// assert_eq!(LogicalOperator::from_string("OR").unwrap(), LogicalOperator::Or);
/// assert_eq!(LogicalOperator::And.code(), 0);
/// ```
#[macro_export]
macro_rules! representable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $token:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::RepresentableEnum for $name {
            const NAME: &'static str = stringify!($name);

            fn members() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::RepresentableEnum::as_str(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::ConversionError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::RepresentableEnum>::from_string(s)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::RepresentableEnum::as_str(*self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let token: ::std::string::String =
                    $crate::__private::serde::Deserialize::deserialize(deserializer)?;
                <Self as $crate::RepresentableEnum>::from_string(&token)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

/// Serde adapter: a required enum field carried as its integer code.
pub mod code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RepresentableEnum;

    pub fn serialize<E, S>(value: &E, serializer: S) -> Result<S::Ok, S::Error>
    where
        E: RepresentableEnum,
        S: Serializer,
    {
        serializer.serialize_i64(value.code())
    }

    pub fn deserialize<'de, E, D>(deserializer: D) -> Result<E, D::Error>
    where
        E: RepresentableEnum,
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        E::from_code(raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter: an optional enum field carried as its integer code or null.
pub mod optional_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RepresentableEnum;

    pub fn serialize<E, S>(value: &Option<E>, serializer: S) -> Result<S::Ok, S::Error>
    where
        E: RepresentableEnum,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.code()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, E, D>(deserializer: D) -> Result<Option<E>, D::Error>
    where
        E: RepresentableEnum,
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(deserializer)?
            .map(E::from_code)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    crate::representable_enum! {
        enum Severity {
            Low = 0 => "low",
            VeryHigh = 7 => "very_high",
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Built {
        #[serde(rename = "Severity", with = "code")]
        severity: Severity,
        #[serde(rename = "Fallback", default, with = "optional_code")]
        fallback: Option<Severity>,
    }

    #[test]
    fn tokens_and_codes_follow_declaration() {
        assert_eq!(Severity::values(), vec!["low", "very_high"]);
        assert_eq!(Severity::VeryHigh.code(), 7);
        assert_eq!(Severity::VeryHigh.to_string(), "very_high");
    }

    #[test]
    fn from_string_ignores_case() {
        assert_eq!(Severity::from_string("VERY_HIGH").unwrap(), Severity::VeryHigh);
        assert_eq!("Low".parse::<Severity>().unwrap(), Severity::Low);
    }

    #[test]
    fn unknown_token_is_rejected_with_enum_name() {
        let err = Severity::from_string("medium").unwrap_err();
        assert!(matches!(
            err,
            ConversionError::UnknownToken { enum_name: "Severity", ref value } if value == "medium"
        ));
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            Severity::from_code(3),
            Err(ConversionError::UnknownCode { enum_name: "Severity", code: 3 })
        ));
    }

    #[test]
    fn members_are_unique() {
        assert!(has_unique_members::<Severity>());
    }

    #[test]
    fn token_serde_uses_string() {
        let json = serde_json::to_value(Severity::VeryHigh).unwrap();
        assert_eq!(json, serde_json::json!("very_high"));
        let back: Severity = serde_json::from_value(serde_json::json!("Very_High")).unwrap();
        assert_eq!(back, Severity::VeryHigh);
    }

    #[test]
    fn code_adapters_use_integers() {
        let built = Built {
            severity: Severity::VeryHigh,
            fallback: None,
        };
        let json = serde_json::to_value(&built).unwrap();
        assert_eq!(json, serde_json::json!({"Severity": 7, "Fallback": null}));

        let parsed: Built = serde_json::from_value(serde_json::json!({"Severity": 0})).unwrap();
        assert_eq!(parsed.severity, Severity::Low);
        assert_eq!(parsed.fallback, None);

        let bad = serde_json::from_value::<Built>(serde_json::json!({"Severity": 4}));
        assert!(bad.unwrap_err().to_string().contains("Severity"));
    }

    proptest! {
        #[test]
        fn every_member_round_trips(idx in 0usize..2, shout in any::<bool>()) {
            let member = Severity::members()[idx];
            let token = if shout {
                member.as_str().to_ascii_uppercase()
            } else {
                member.to_string()
            };
            prop_assert_eq!(Severity::from_string(&token).unwrap(), member);
            prop_assert_eq!(Severity::from_code(member.code()).unwrap(), member);
        }
    }
}
