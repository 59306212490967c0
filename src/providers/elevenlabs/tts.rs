use serde::{Deserialize, Serialize};

use super::voices::VoiceSettings;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TextToSpeechRequest {
    /// The text that will be used to generate speech
    pub text: String,
    /// Voice settings to be used by the model. Unset fields are picked by ElevenLabs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceSettings>,
    /// The model that will be used to generate speech. If unset, ElevenLabs uses its default model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// The audio output format, sent as a query parameter rather than in the body.
    #[serde(skip)]
    pub output_format: Option<AudioOutputFormat>,
}

impl TextToSpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_settings: None,
            model_id: None,
            output_format: None,
        }
    }

    pub fn model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = Some(settings);
        self
    }

    pub fn output_format(mut self, format: AudioOutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub(crate) fn path(&self, voice_id: &str, stream: bool) -> String {
        let mut path = format!("/text-to-speech/{}", urlencoding::encode(voice_id));
        if stream {
            path.push_str("/stream");
        }
        if let Some(format) = &self.output_format {
            path.push_str("?output_format=");
            path.push_str(format.as_str());
        }
        path
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum AudioOutputFormat {
    /// MP3 with 22.05kHz sample at 32kbs
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,

    /// MP3 with 44.1kHz sample at 64kbs
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,

    /// MP3 with 44.1kHz sample at 128kbs
    #[serde(rename = "mp3_44100_128")]
    #[default]
    Mp3_44100_128,

    /// MP3 with 44.1kHz sample at 192kbs
    #[serde(rename = "mp3_44100_192")]
    Mp3_44100_192,

    /// PCM with 16kHz sample
    #[serde(rename = "pcm_16000")]
    Pcm16000,

    /// PCM with 22.05kHz sample
    #[serde(rename = "pcm_22050")]
    Pcm22050,

    /// PCM with 44.1kHz sample
    #[serde(rename = "pcm_44100")]
    Pcm44100,

    /// ULaw with 8kHz sample
    #[serde(rename = "ulaw_8000")]
    Ulaw8000,

    /// Opus with 48kHz sample at 64kbs
    #[serde(rename = "opus_48000_64")]
    Opus4800064,
}

impl AudioOutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3_22050_32 => "mp3_22050_32",
            Self::Mp3_44100_64 => "mp3_44100_64",
            Self::Mp3_44100_128 => "mp3_44100_128",
            Self::Mp3_44100_192 => "mp3_44100_192",
            Self::Pcm16000 => "pcm_16000",
            Self::Pcm22050 => "pcm_22050",
            Self::Pcm44100 => "pcm_44100",
            Self::Ulaw8000 => "ulaw_8000",
            Self::Opus4800064 => "opus_48000_64",
        }
    }
}
