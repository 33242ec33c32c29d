//! Compact record encoding for texture profiles.
//!
//! Records are stored as a small JSON object whose optional keys are omitted
//! entirely when empty. Key order is fixed:
//! `uuid, username, skinUrl, [skinModel], [capeUrl], [mojangTextures, mojangSignature]`.
//! Re-encoding a decoded record yields the same bytes.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use skinsystem_core::{Error, Result, TextureProfile};

/// Worst case for a long username, two texture links and a signed Mojang payload.
const ENCODE_CAPACITY: usize = 1536;

/// A single key of the encoded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a str,
    pub present: bool,
}

impl<'a> Field<'a> {
    fn required(name: &'static str, value: &'a str) -> Self {
        Self {
            name,
            value,
            present: true,
        }
    }

    fn optional(name: &'static str, value: &'a str, present: bool) -> Self {
        Self {
            name,
            value,
            present,
        }
    }
}

/// The fields of `profile` in encoding order, each flagged with whether it is
/// written.
pub fn fields(profile: &TextureProfile) -> [Field<'_>; 7] {
    let has_skin = !profile.skin_url.is_empty();
    let has_textures = !profile.mojang_textures.is_empty();

    [
        Field::required("uuid", &profile.id),
        Field::required("username", &profile.username),
        Field::optional("skinUrl", &profile.skin_url, has_skin),
        Field::optional(
            "skinModel",
            &profile.skin_model,
            has_skin && !profile.skin_model.is_empty(),
        ),
        Field::optional("capeUrl", &profile.cape_url, !profile.cape_url.is_empty()),
        Field::optional("mojangTextures", &profile.mojang_textures, has_textures),
        // Always written together with the textures, even when empty
        Field::optional("mojangSignature", &profile.mojang_signature, has_textures),
    ]
}

/// Writes `"name":"value"` pairs into a single pre-sized buffer.
struct FieldWriter {
    buf: Vec<u8>,
    empty: bool,
}

impl FieldWriter {
    fn with_capacity(capacity: usize) -> Self {
        let mut buf = Vec::with_capacity(capacity);
        buf.push(b'{');
        Self { buf, empty: true }
    }

    fn write(&mut self, field: &Field<'_>) -> Result<()> {
        if !field.present {
            return Ok(());
        }

        if !self.empty {
            self.buf.push(b',');
        }
        self.empty = false;

        self.buf.push(b'"');
        self.buf.extend_from_slice(field.name.as_bytes());
        self.buf.extend_from_slice(b"\":");
        serde_json::to_writer(&mut self.buf, field.value)
            .map_err(|e| Error::Encode(format!("Failed to write field {}: {}", field.name, e)))
    }

    fn finish(mut self) -> Vec<u8> {
        self.buf.push(b'}');
        self.buf
    }
}

/// Encode a profile into its compact form.
pub fn encode(profile: &TextureProfile) -> Result<Vec<u8>> {
    let mut writer = FieldWriter::with_capacity(ENCODE_CAPACITY);
    for field in &fields(profile) {
        writer.write(field)?;
    }

    Ok(writer.finish())
}

/// Stored shape of a record. Unknown keys written by older schema versions are
/// ignored, and known keys holding `null` or a non-string value read as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct StoredProfile {
    #[serde(deserialize_with = "string_or_empty")]
    uuid: String,
    #[serde(deserialize_with = "string_or_empty")]
    username: String,
    #[serde(deserialize_with = "string_or_empty")]
    skin_url: String,
    #[serde(deserialize_with = "string_or_empty")]
    skin_model: String,
    #[serde(deserialize_with = "string_or_empty")]
    cape_url: String,
    #[serde(deserialize_with = "string_or_empty")]
    mojang_textures: String,
    #[serde(deserialize_with = "string_or_empty")]
    mojang_signature: String,
}

fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        _ => Ok(String::new()),
    }
}

impl From<StoredProfile> for TextureProfile {
    fn from(stored: StoredProfile) -> Self {
        let has_skin = !stored.skin_url.is_empty();
        let has_textures = !stored.mojang_textures.is_empty();

        TextureProfile {
            id: stored.uuid,
            previous_username: stored.username.clone(),
            username: stored.username,
            skin_model: if has_skin {
                stored.skin_model
            } else {
                String::new()
            },
            skin_url: stored.skin_url,
            cape_url: stored.cape_url,
            mojang_signature: if has_textures {
                stored.mojang_signature
            } else {
                String::new()
            },
            mojang_textures: stored.mojang_textures,
        }
    }
}

/// Decode a profile from its compact form.
///
/// The decoded username is copied into `previous_username`. Anything other
/// than a JSON object is rejected.
pub fn decode(data: &[u8]) -> Result<TextureProfile> {
    if data.iter().find(|b| !b.is_ascii_whitespace()) != Some(&b'{') {
        return Err(Error::Decode(
            "Invalid profile record: expected a JSON object".to_string(),
        ));
    }

    let stored: StoredProfile = serde_json::from_slice(data)
        .map_err(|e| Error::Decode(format!("Invalid profile record: {}", e)))?;

    Ok(stored.into())
}
