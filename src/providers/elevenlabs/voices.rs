//! Voice records as returned by the `/voices` endpoints.
//!
//! These are only ever decoded from responses (or forwarded back as edits),
//! so most fields fall back to their defaults when the API leaves them out.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes `null` as the type's default, the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Voices {
    pub voices: Vec<Voice>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voice {
    #[serde(deserialize_with = "null_as_default")]
    pub voice_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub samples: Option<Vec<Sample>>,
    pub category: Option<String>,
    pub fine_tuning: Option<FineTuning>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    pub description: Option<String>,
    pub preview_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub available_for_tiers: Vec<String>,
    pub settings: Option<Settings>,
    pub sharing: Option<Sharing>,
}

/// An audio sample attached to a voice.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    #[serde(deserialize_with = "null_as_default")]
    pub sample_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size_bytes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub hash: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FineTuning {
    pub model_id: Option<String>,
    pub language: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_allowed_to_fine_tune: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub fine_tuning_requested: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub finetuning_state: String,
    pub verification_attempts: Option<Vec<VerificationAttempt>>,
    #[serde(deserialize_with = "null_as_default")]
    pub verification_failures: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub verification_attempts_count: u32,
    pub slice_ids: Option<Vec<String>>,
    pub manual_verification: Option<ManualVerification>,
    #[serde(deserialize_with = "null_as_default")]
    pub manual_verification_requested: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualVerification {
    #[serde(deserialize_with = "null_as_default")]
    pub extra_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub request_time_unix: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<VerificationFile>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationFile {
    #[serde(deserialize_with = "null_as_default")]
    pub file_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size_bytes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_date_unix: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationAttempt {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_unix: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub accepted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub similarity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub levenshtein_distance: f64,
    pub recording: Option<Recording>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recording {
    #[serde(deserialize_with = "null_as_default")]
    pub recording_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mime_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size_bytes: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub upload_date_unix: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub transcription: String,
}

/// Voice settings as stored on the remote service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub stability: f64,
    pub similarity_boost: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_speaker_boost: bool,
}

/// A partial set of voice settings sent along with a synthesis request.
/// Unset fields are left out of the request and filled in remotely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<Settings> for VoiceSettings {
    fn from(settings: Settings) -> Self {
        Self {
            stability: Some(settings.stability),
            similarity_boost: Some(settings.similarity_boost),
            style: Some(settings.style),
            use_speaker_boost: Some(settings.use_speaker_boost),
            speed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sharing {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub history_item_sample_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled_in_library: bool,
    pub original_voice_id: Option<String>,
    pub public_owner_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub liked_by_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub cloned_by_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub whitelisted_emails: Vec<String>,
}

/// Body of the edit voice call (name, description, labels, ...).
///
/// Kept loosely typed: whatever keys the caller sets are forwarded.
pub type VoiceEdit = serde_json::Map<String, serde_json::Value>;

/// Body of the edit voice settings call.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct EditVoiceSettingsRequest {
    pub stability: f64,
    pub similarity_boost: f64,
}
