//! Request/response behavior of every client call, checked against a mock server.

use elevenlabs_client::providers::elevenlabs::{
    Client, ElevenLabsConfig, ElevenLabsError, NewVoice, VoiceEdit, VoiceSample, VoiceSettings,
    XI_API_KEY_HEADER,
};
use futures::StreamExt;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TEST_KEY: &str = "test-api-key";

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::from_url(
        ElevenLabsConfig::new(TEST_KEY),
        &format!("{}/v1", server.uri()),
    );
    (server, client)
}

fn settings_json() -> serde_json::Value {
    json!({
        "stability": 0.5,
        "similarity_boost": 0.75,
        "style": 0.0,
        "use_speaker_boost": true
    })
}

fn is_multipart(req: &Request) -> bool {
    req.headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[tokio::test]
async fn get_voices_sends_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voices": [{
                "voice_id": "21m00Tcm4TlvDq8ikWAM",
                "name": "Rachel",
                "category": "premade",
                "labels": { "accent": "american" },
                "available_for_tiers": []
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let res = client.get_voices().await.unwrap();

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data.voices.len(), 1);
    assert_eq!(res.data.voices[0].name, "Rachel");
}

#[tokio::test]
async fn default_voice_settings_omits_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/voices/settings/default"))
        .and(|req: &Request| !req.headers.contains_key(XI_API_KEY_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_json()))
        .expect(1)
        .mount(&server)
        .await;

    let settings = client.get_default_voice_settings().await.unwrap().into_data();

    assert_eq!(settings.stability, 0.5);
    assert!(settings.use_speaker_boost);
}

#[tokio::test]
async fn voice_reads_send_api_key() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/voices/abc/settings"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/voices/abc"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voice_id": "abc",
            "name": "Custom",
            "settings": settings_json()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = client.get_voice_settings("abc").await.unwrap().into_data();
    assert_eq!(settings.similarity_boost, 0.75);

    let voice = client.get_voice("abc").await.unwrap().into_data();
    assert_eq!(voice.voice_id, "abc");
    assert_eq!(voice.settings.unwrap().stability, 0.5);
}

#[tokio::test]
async fn delete_voice_sends_delete_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/voices/abc"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(|req: &Request| req.body.is_empty())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let res = client.delete_voice("abc").await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&res.data).unwrap();

    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn edit_voice_settings_renames_similarity_boost() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/voices/abc/settings/edit"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(body_json(json!({ "stability": 0.5, "similarity_boost": 0.75 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_json()))
        .expect(1)
        .mount(&server)
        .await;

    client.edit_voice_settings("abc", 0.5, 0.75).await.unwrap();
}

#[tokio::test]
async fn edit_voice_strips_voice_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/voices/abc/edit"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(is_multipart)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut data = VoiceEdit::new();
    data.insert("voice_id".into(), json!("abc"));
    data.insert("name".into(), json!("Renamed"));
    data.insert("labels".into(), json!({ "accent": "british" }));

    client.edit_voice("abc", data).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);

    assert!(!body.contains("name=\"voice_id\""));
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Renamed"));
    assert!(body.contains(r#"{"accent":"british"}"#));
}

#[tokio::test]
async fn add_voice_uploads_decoded_samples() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/voices/add"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(header("accept", "application/json"))
        .and(is_multipart)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "voice_id": "new-voice" })))
        .expect(1)
        .mount(&server)
        .await;

    let first: Vec<u8> = (0..2500u32).map(|i| (i % 256) as u8).collect();
    let second: Vec<u8> = vec![7u8; 500];

    let voice = NewVoice::new("My voice", "A test voice")
        .file(VoiceSample::from_bytes("one.mp3", "audio/mpeg", &first))
        .file(VoiceSample::from_bytes("two.wav", "audio/wav", &second));

    let res = client.add_voice(voice).await.unwrap();
    assert_eq!(res.data, json!({ "voice_id": "new-voice" }));

    let requests = server.received_requests().await.unwrap();
    let body = &requests[0].body;
    let text = String::from_utf8_lossy(body);

    assert!(contains_bytes(body, &first));
    assert!(contains_bytes(body, &second));
    assert!(text.contains("filename=\"one.mp3\""));
    assert!(text.contains("filename=\"two.wav\""));
    let lower = text.to_lowercase();
    assert!(lower.contains("content-type: audio/mpeg"));
    assert!(lower.contains("content-type: audio/wav"));
    assert_eq!(text.matches("name=\"files\"").count(), 2);

    let name_at = text.find("name=\"name\"").unwrap();
    let files_at = text.find("name=\"files\"").unwrap();
    let description_at = text.find("name=\"description\"").unwrap();
    assert!(name_at < files_at && files_at < description_at);
}

#[tokio::test]
async fn add_voice_with_bad_base64_sends_nothing() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v1/voices/add"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let voice = NewVoice::new("Broken", "")
        .file(VoiceSample::new("bad.mp3", "audio/mpeg", "not*base64"));

    let err = client.add_voice(voice).await.unwrap_err();

    assert!(matches!(err, ElevenLabsError::Decode { ref file_name, .. } if file_name == "bad.mp3"));
}

#[tokio::test]
async fn text_to_speech_returns_full_buffer() {
    let (server, client) = setup().await;
    let audio = vec![0xFFu8, 0xFB, 0x90, 0x00, 0x01, 0x02];

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-1"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(header("accept", "audio/mpeg"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "text": "Hello", "model_id": "eleven_v3" })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(audio.clone(), "audio/mpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let res = client
        .text_to_speech("voice-1", "Hello", Some("eleven_v3"), None)
        .await
        .unwrap();

    assert_eq!(res.data.as_ref(), audio.as_slice());
}

#[tokio::test]
async fn text_to_speech_stream_hits_stream_path() {
    let (server, client) = setup().await;
    let audio: Vec<u8> = (0..10_000u32).map(|i| (i % 200) as u8).collect();

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-1/stream"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(header("accept", "audio/mpeg"))
        .and(body_json(json!({
            "text": "Hello",
            "voice_settings": { "stability": 0.3 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(audio.clone(), "audio/mpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = VoiceSettings {
        stability: Some(0.3),
        ..Default::default()
    };
    let mut stream = client
        .text_to_speech_stream("voice-1", "Hello", None, Some(settings))
        .await
        .unwrap()
        .into_data();

    let mut received = Vec::new();
    while let Some(chunk) = stream.next().await {
        received.extend_from_slice(&chunk.unwrap());
    }

    assert_eq!(received, audio);
}

#[tokio::test]
async fn get_models_lists_models() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "model_id": "eleven_multilingual_v2", "name": "Eleven Multilingual v2", "can_do_text_to_speech": true },
            { "model_id": "eleven_turbo_v2_5" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let models = client.get_models().await.unwrap().into_data();

    assert_eq!(models.len(), 2);
    assert_eq!(models[0].model_id, "eleven_multilingual_v2");
    assert_eq!(models[0].extra.get("can_do_text_to_speech"), Some(&json!(true)));
    assert!(models[1].name.is_none());
}

#[tokio::test]
async fn get_user_subscription_wraps_single_object() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/user/subscription"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tier": "free",
            "character_count": 42,
            "character_limit": 10000,
            "status": "free",
            "next_invoice": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subs = client.get_user_subscription().await.unwrap().into_data();

    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].tier, "free");
    assert_eq!(subs[0].character_count, 42);
    assert!(subs[0].next_invoice.is_none());
}

#[tokio::test]
async fn api_error_is_surfaced_intact() {
    let (server, client) = setup().await;
    let error_body = json!({
        "detail": { "status": "invalid_api_key", "message": "Invalid API key" }
    });

    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body.clone()))
        .mount(&server)
        .await;

    let err = client.get_voices().await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    let api_error = err.api_error().expect("expected an API error");
    assert_eq!(serde_json::to_value(api_error).unwrap(), error_body);
    assert_eq!(api_error.code(), Some("invalid_api_key"));
}

#[tokio::test]
async fn transport_failure_is_an_http_error() {
    // Nothing listens on port 1.
    let client = Client::from_url(ElevenLabsConfig::new(TEST_KEY), "http://127.0.0.1:1/v1");
    let err = client.get_models().await.unwrap_err();

    assert!(matches!(err, ElevenLabsError::Http(_)));
}

#[tokio::test]
async fn api_error_without_detail_is_not_rewritten() {
    let (server, client) = setup().await;
    let error_body = json!({ "message": "Unauthorized" });

    Mock::given(method("GET"))
        .and(path("/v1/voices"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body.clone()))
        .mount(&server)
        .await;

    let err = client.get_voices().await.unwrap_err();
    let api_error = err.api_error().expect("expected an API error");

    assert_eq!(serde_json::to_value(api_error).unwrap(), error_body);
    assert_eq!(api_error.message(), Some("Unauthorized"));
}

#[tokio::test]
async fn non_object_error_body_is_kept_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(429).set_body_raw(r#"["slow down"]"#, "application/json"))
        .mount(&server)
        .await;

    let err = client.get_models().await.unwrap_err();
    let api_error = err.api_error().expect("expected an API error");

    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
    assert_eq!(serde_json::to_value(api_error).unwrap(), json!(["slow down"]));
    assert_eq!(api_error.raw.as_ref(), br#"["slow down"]"#);
}

#[tokio::test]
async fn voice_id_stays_in_one_path_segment() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/voices/a%2Fb%3Fc/settings"))
        .and(header(XI_API_KEY_HEADER, TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_json()))
        .expect(1)
        .mount(&server)
        .await;

    client.get_voice_settings("a/b?c").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}
