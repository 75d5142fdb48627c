use derive_more::Display;
use fnv::FnvHasher;
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    convert::TryInto,
    fmt,
    hash::{Hash, Hasher},
};

/// RNG seed for everything random in map generation: the noise function and
/// the decoration/scenery RNG stream.
///
/// When deserializing, this type accepts:
/// - An integer that fits into `u64`, used as-is
/// - A string that parses as a `u64`, used as the parsed value
/// - Any other string, kept as text and hashed when the seed is used
///
/// Anything else (negative or oversized integers, floats, etc.) is an error.
///
/// Seeds always serialize as a **string**. JSON and TOML don't handle 64-bit
/// unsigned integers well, and a string round-trips to the same seed.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Seed {
    /// An integer seed, which can be used directly
    Int(u64),
    /// A textual seed, hashed into a `u64` before use
    Text(String),
}

impl Seed {
    /// Convert the seed to a `u64`, so it can be fed to an RNG
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Int(seed) => *seed,
            Self::Text(text) => {
                let mut hasher = FnvHasher::default();
                text.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl Default for Seed {
    /// A random seed. This means the default varies between calls!
    fn default() -> Self {
        Self::Int(rand::random())
    }
}

impl From<u64> for Seed {
    fn from(seed: u64) -> Self {
        Self::Int(seed)
    }
}

// Numeric strings become ints, everything else is kept as text
impl From<&str> for Seed {
    fn from(seed_str: &str) -> Self {
        match seed_str.parse::<u64>() {
            Ok(seed) => Self::Int(seed),
            Err(_) => Self::Text(seed_str.into()),
        }
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        // Ints and strings are both fine, so no type hint
        deserializer.deserialize_any(SeedVisitor)
    }
}

macro_rules! impl_visit_int {
    ($fname:ident, $type:ty) => {
        fn $fname<E>(self, value: $type) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value
                .try_into()
                .map(Seed::Int)
                .map_err(|_| E::custom(format!("u64 out of range: {}", value)))
        }
    };
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a positive integer or string")
    }

    impl_visit_int!(visit_u8, u8);
    impl_visit_int!(visit_u16, u16);
    impl_visit_int!(visit_u32, u32);
    impl_visit_int!(visit_u64, u64);
    impl_visit_int!(visit_i8, i8);
    impl_visit_int!(visit_i16, i16);
    impl_visit_int!(visit_i32, i32);
    impl_visit_int!(visit_i64, i64);

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{
        assert_de_tokens, assert_de_tokens_error, assert_ser_tokens, Token,
    };

    #[test]
    fn test_from_str() {
        assert_eq!(Seed::from("0"), Seed::Int(0));
        assert_eq!(Seed::from("2718281828"), Seed::Int(2718281828));
        assert_eq!(Seed::from("-1"), Seed::Text("-1".into()));
        assert_eq!(Seed::from("island"), Seed::Text("island".into()));
    }

    #[test]
    fn test_to_u64() {
        assert_eq!(Seed::Int(42).to_u64(), 42);

        // Text seeds hash deterministically, and differently per string
        let island = Seed::Text("island".into());
        assert_eq!(island.to_u64(), island.clone().to_u64());
        assert_ne!(island.to_u64(), Seed::Text("archipelago".into()).to_u64());
    }

    #[test]
    fn test_serialize() {
        assert_ser_tokens(&Seed::Int(42), &[Token::String("42")]);
        assert_ser_tokens(
            &Seed::Text("island".into()),
            &[Token::String("island")],
        );
    }

    #[test]
    fn test_deserialize() {
        assert_de_tokens(&Seed::Int(42), &[Token::U64(42)]);
        assert_de_tokens(&Seed::Int(42), &[Token::String("42")]);
        assert_de_tokens(
            &Seed::Text("island".into()),
            &[Token::String("island")],
        );

        assert_de_tokens_error::<Seed>(
            &[Token::I32(-1)],
            "u64 out of range: -1",
        );
        assert_de_tokens_error::<Seed>(
            &[Token::Bool(true)],
            "invalid type: boolean `true`, \
            expected a positive integer or string",
        );
    }
}
