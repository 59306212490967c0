use serde::{Deserialize, Serialize};

/// The ElevenLabs eleven_multilingual_v2 model.
pub const ELEVEN_MULTILINGUAL_V2: &str = "eleven_multilingual_v2";

/// The ElevenLabs eleven_v3 model.
pub const ELEVEN_V3: &str = "eleven_v3";

/// The ElevenLabs eleven_flash_v2 model.
pub const ELEVEN_FLASH_V2: &str = "eleven_flash_v2";

/// The ElevenLabs eleven_turbo_v2_5 model.
pub const ELEVEN_TURBO_V2_5: &str = "eleven_turbo_v2_5";

/// A TTS model descriptor. Only `model_id` is ever used by this crate; the
/// rest of the payload is passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
