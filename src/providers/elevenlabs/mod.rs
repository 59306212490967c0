//! The module for Eleven Labs.
//!
//! A thin client over the ElevenLabs HTTP API: voices, models, the account
//! subscription and text-to-speech. Each method on [`Client`] sends a single
//! request and hands back the response.
//!
//! ```no_run
//! use elevenlabs_client::providers::elevenlabs::{Client, ElevenLabsConfig, ELEVEN_MULTILINGUAL_V2};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ElevenLabsConfig::new("your-elevenlabs-api-key"));
//!
//! let voices = client.get_voices().await?.into_data();
//! let audio = client
//!     .text_to_speech(&voices.voices[0].voice_id, "Hello world!", Some(ELEVEN_MULTILINGUAL_V2), None)
//!     .await?
//!     .into_data();
//!
//! std::fs::write("hello.mp3", &audio)?;
//! # Ok(())
//! # }
//! ```
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod subscription;
pub mod tts;
pub mod upload;
pub mod voices;

pub use client::{ApiResponse, AudioStream, Client, XI_API_KEY_HEADER};
pub use config::{ELEVENLABS_API_BASE_URL, ELEVENLABS_API_KEY_ENV, ElevenLabsConfig};
pub use error::{ApiError, ElevenLabsError, Result};
pub use models::{ELEVEN_FLASH_V2, ELEVEN_MULTILINGUAL_V2, ELEVEN_TURBO_V2_5, ELEVEN_V3, Model};
pub use subscription::{NextInvoice, Subscription};
pub use tts::{AudioOutputFormat, TextToSpeechRequest};
pub use upload::{Blob, NewVoice, SLICE_SIZE, VoiceSample, base64_to_blob};
pub use voices::{Settings, Voice, VoiceEdit, VoiceSettings, Voices};
