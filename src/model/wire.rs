//! Lenient decoding helpers for fields the simulator may send as either
//! numbers or strings.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// Zero, `false` and the empty string carry no information.
    fn is_blank(&self) -> bool {
        match self {
            Scalar::Int(v) => *v == 0,
            Scalar::Float(v) => *v == 0.0,
            Scalar::Bool(v) => !v,
            Scalar::Text(v) => v.trim().is_empty(),
        }
    }

    fn into_string(self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Bool(v) => v.to_string(),
            Scalar::Text(v) => v,
        }
    }
}

pub(crate) fn scalar_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(d).map(Scalar::into_string)
}

/// An optional scalar as a string; blank values decode as `None`.
pub(crate) fn opt_present_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(d)?
        .filter(|v| !v.is_blank())
        .map(Scalar::into_string))
}

pub(crate) fn scalar_strings<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Vec::<Scalar>::deserialize(d)?
        .into_iter()
        .map(Scalar::into_string)
        .collect())
}
