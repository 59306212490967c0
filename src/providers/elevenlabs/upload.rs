//! Multipart bodies for the add voice and edit voice calls.
//!
//! Voice samples arrive base64 encoded. They are decoded into a [`Blob`] made
//! of fixed-size chunks and attached to the form as binary `files` parts.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use bytes::{Bytes, BytesMut};
use reqwest::multipart::{Form, Part};

use super::error::{ElevenLabsError, Result};
use super::voices::VoiceEdit;

/// Size of each chunk a decoded sample is split into.
pub const SLICE_SIZE: usize = 1024;

/// A voice sample to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceSample {
    pub file_name: String,
    pub mime_type: String,
    /// Standard base64 encoding of the audio file.
    pub data_base64: String,
}

impl VoiceSample {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data_base64: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data_base64: data_base64.into(),
        }
    }

    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(file_name, mime_type, BASE64_STANDARD.encode(data))
    }
}

/// A new voice: display name, samples and description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewVoice {
    pub name: String,
    pub files: Vec<VoiceSample>,
    pub description: String,
}

/// Decoded binary data, kept as an ordered list of chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Blob {
    pub content_type: String,
    pub chunks: Vec<Bytes>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Concatenates the chunks back into one buffer.
    pub fn into_bytes(self) -> Bytes {
        if let [single] = self.chunks.as_slice() {
            return single.clone();
        }

        let mut buf = BytesMut::with_capacity(self.len());
        for chunk in &self.chunks {
            buf.extend_from_slice(chunk);
        }
        buf.freeze()
    }
}

/// Decodes `data` and splits it into [`SLICE_SIZE`] chunks; only the last one
/// may be shorter.
pub fn base64_to_blob(
    data: &str,
    content_type: &str,
) -> std::result::Result<Blob, base64::DecodeError> {
    let decoded = Bytes::from(BASE64_STANDARD.decode(data)?);

    let mut chunks = Vec::with_capacity(decoded.len().div_ceil(SLICE_SIZE));
    let mut begin = 0;
    while begin < decoded.len() {
        let end = (begin + SLICE_SIZE).min(decoded.len());
        chunks.push(decoded.slice(begin..end));
        begin = end;
    }

    Ok(Blob {
        content_type: content_type.to_string(),
        chunks,
    })
}

impl NewVoice {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            description: description.into(),
        }
    }

    pub fn file(mut self, sample: VoiceSample) -> Self {
        self.files.push(sample);
        self
    }

    /// Builds the `name`, `files`..., `description` form. Every sample is decoded
    /// up front, so a bad one fails before anything is sent.
    pub(crate) fn into_form(self) -> Result<Form> {
        let mut form = Form::new().text("name", self.name);

        for sample in self.files {
            let blob = base64_to_blob(&sample.data_base64, &sample.mime_type).map_err(|source| {
                ElevenLabsError::Decode {
                    file_name: sample.file_name.clone(),
                    source,
                }
            })?;

            tracing::debug!(
                file_name = %sample.file_name,
                size = blob.len(),
                chunks = blob.chunks.len(),
                "Attaching voice sample"
            );

            let content_type = blob.content_type.clone();
            let mut part = Part::bytes(blob.into_bytes().to_vec());
            if !content_type.is_empty() {
                part = part.mime_str(&content_type).map_err(|source| {
                    ElevenLabsError::InvalidMimeType {
                        file_name: sample.file_name.clone(),
                        mime_type: content_type.clone(),
                        source,
                    }
                })?;
            }
            form = form.part("files", part.file_name(sample.file_name));
        }

        Ok(form.text("description", self.description))
    }
}

/// Turns an edit voice payload into form fields, dropping `voice_id`.
pub(crate) fn edit_voice_form(mut data: VoiceEdit) -> Form {
    data.remove("voice_id");

    data.into_iter().fold(Form::new(), |form, (key, value)| match value {
        serde_json::Value::String(text) => form.text(key, text),
        other => form.text(key, other.to_string()),
    })
}
