use elevenlabs_client::providers::elevenlabs::{
    Client, ELEVEN_MULTILINGUAL_V2, ElevenLabsConfig, VoiceSettings,
};
use futures::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // Stand-in for pulling the key out of a secrets store at startup.
    let client = Client::from_factory(|| async {
        Ok::<_, anyhow::Error>(ElevenLabsConfig::from_env()?)
    })
    .await?;

    let subscription = client.get_user_subscription().await?.into_data();
    if let Some(sub) = subscription.first() {
        println!(
            "Tier: {} ({}/{} characters used)",
            sub.tier, sub.character_count, sub.character_limit
        );
    }

    let voices = client.get_voices().await?.into_data().voices;
    let Some(voice) = voices.first() else {
        println!("No voices available on this account");
        return Ok(());
    };
    println!("Using voice {} ({})", voice.name, voice.voice_id);

    let settings = VoiceSettings {
        stability: Some(0.5),
        similarity_boost: Some(0.75),
        ..Default::default()
    };

    let audio = client
        .text_to_speech(
            &voice.voice_id,
            "Hello world!",
            Some(ELEVEN_MULTILINGUAL_V2),
            Some(settings.clone()),
        )
        .await?
        .into_data();
    std::fs::write("hello.mp3", &audio)?;

    let mut stream = client
        .text_to_speech_stream(&voice.voice_id, "Hello again, in pieces.", None, Some(settings))
        .await?
        .into_data();

    let mut streamed = Vec::new();
    while let Some(chunk) = stream.next().await {
        streamed.extend_from_slice(&chunk?);
    }
    std::fs::write("hello_streamed.mp3", &streamed)?;

    Ok(())
}
