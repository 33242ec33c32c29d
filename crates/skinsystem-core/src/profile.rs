//! Texture records served to game clients.

use serde::Serialize;

/// Skin model value for the slim (alternate arm) variant. The default model is
/// the empty string.
pub const SLIM_MODEL: &str = "slim";

/// Per-user texture metadata.
///
/// Empty strings mean "absent" for every optional field; the record is never
/// mutated in place by the store, updates are whole-record overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureProfile {
    /// Globally unique identifier (usually a dashless UUID). May be empty for
    /// legacy records.
    pub id: String,
    /// Username with its original casing.
    pub username: String,
    /// Skin URL, empty when the user has no custom skin.
    pub skin_url: String,
    /// Skin model; only meaningful together with `skin_url`.
    pub skin_model: String,
    /// Cape URL, empty when the user has no cape.
    pub cape_url: String,
    /// Opaque base64 textures payload from Mojang's skin system.
    pub mojang_textures: String,
    /// Signature over `mojang_textures`.
    pub mojang_signature: String,
    /// Username the record was stored under at the time it was read.
    ///
    /// Filled by the decoder, never encoded.
    #[serde(skip)]
    pub previous_username: String,
}

impl TextureProfile {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_skin(mut self, url: impl Into<String>, model: impl Into<String>) -> Self {
        self.skin_url = url.into();
        self.skin_model = model.into();
        self
    }

    pub fn with_cape(mut self, url: impl Into<String>) -> Self {
        self.cape_url = url.into();
        self
    }

    pub fn with_mojang_textures(
        mut self,
        textures: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        self.mojang_textures = textures.into();
        self.mojang_signature = signature.into();
        self
    }

    pub fn has_skin(&self) -> bool {
        !self.skin_url.is_empty()
    }

    pub fn has_cape(&self) -> bool {
        !self.cape_url.is_empty()
    }

    pub fn is_slim(&self) -> bool {
        self.has_skin() && self.skin_model == SLIM_MODEL
    }

    pub fn has_mojang_textures(&self) -> bool {
        !self.mojang_textures.is_empty()
    }

    /// True when the username changed since the record was read.
    pub fn is_renamed(&self) -> bool {
        !self.previous_username.is_empty() && self.previous_username != self.username
    }
}

/// Raw cape image as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cape {
    /// PNG bytes.
    pub data: Vec<u8>,
}

impl Cape {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
