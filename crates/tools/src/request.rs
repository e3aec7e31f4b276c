use {
    serde::{Deserialize, Deserializer},
    serde_json::Value,
};

use crate::error::{Error, Result};

/// Arguments accepted by both transfer tools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransferRequest {
    /// Absolute path of the local file to upload.
    #[serde(default, deserialize_with = "non_empty")]
    pub file_path: Option<String>,

    /// Destination chat. Opaque: passed to Telegram untouched. Auto-detected
    /// from recent updates when absent.
    #[serde(default, deserialize_with = "opaque_id")]
    pub chat_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub caption: String,
}

impl TransferRequest {
    /// Parse a `tools/call` arguments value. `null` counts as no arguments.
    pub fn from_arguments(arguments: Value) -> Result<Self> {
        match arguments {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(arguments)
                .map_err(|e| Error::InvalidArguments(e.to_string())),
            other => Err(Error::InvalidArguments(format!(
                "expected an object, got {other}"
            ))),
        }
    }
}

fn non_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Accept chat ids given as JSON strings or integers.
fn opaque_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(|raw| match raw {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        })
        .filter(|id| !id.is_empty()))
}

fn null_as_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
