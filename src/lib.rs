pub mod providers;

pub use providers::elevenlabs::{Client, ElevenLabsConfig, ElevenLabsError};
