use std::fmt::{self, Debug};

use bytes::Bytes;
use futures::{StreamExt, TryStreamExt, stream::BoxStream};
use reqwest::{
    Method, RequestBuilder, Response, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap},
};
use serde::de::DeserializeOwned;

use super::{
    config::{ELEVENLABS_API_BASE_URL, ElevenLabsConfig},
    error::{ApiError, ElevenLabsError, Result},
    models::Model,
    subscription::{Subscription, Subscriptions},
    tts::TextToSpeechRequest,
    upload::{NewVoice, edit_voice_form},
    voices::{EditVoiceSettingsRequest, Settings, Voice, VoiceEdit, VoiceSettings, Voices},
};

pub const XI_API_KEY_HEADER: &str = "xi-api-key";

const APPLICATION_JSON: &str = "application/json";
const AUDIO_MPEG: &str = "audio/mpeg";

/// A streamed audio body. Chunks are yielded as they arrive.
pub type AudioStream = BoxStream<'static, Result<Bytes>>;

/// A successful response: status, headers and the decoded body.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
        }
    }
}

/// Whether the `xi-api-key` header goes on a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Auth {
    ApiKey,
    Anonymous,
}

/// The ElevenLabs API client.
///
/// Every method maps to exactly one HTTP request. Methods are `async` and
/// nothing is sent until the returned future is polled; dropping it aborts the
/// request. The client is cheap to clone and holds no mutable state.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    config: ElevenLabsConfig,
    http_client: reqwest::Client,
}

impl Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("http_client", &self.http_client)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl Client {
    pub fn new(config: ElevenLabsConfig) -> Self {
        Self::from_url(config, ELEVENLABS_API_BASE_URL)
    }

    /// Create a client against a different origin (a proxy, a mock server...).
    pub fn from_url(config: ElevenLabsConfig, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client from the `ELEVENLABS_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ElevenLabsConfig::from_env()?))
    }

    /// Create a client from an asynchronous configuration factory.
    /// See [`ElevenLabsConfig::from_factory`].
    pub async fn from_factory<F, Fut>(factory: F) -> Result<Self>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<ElevenLabsConfig>>,
    {
        Ok(Self::new(ElevenLabsConfig::from_factory(factory).await?))
    }

    pub fn with_custom_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = client;
        self
    }

    pub fn config(&self) -> &ElevenLabsConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, auth: Auth) -> RequestBuilder {
        let mut url = self.base_url.clone();
        url.push_str(path);

        tracing::debug!(%method, path, "Sending ElevenLabs request");

        let builder = self.http_client.request(method, url);
        match auth {
            Auth::ApiKey => builder.header(XI_API_KEY_HEADER, self.config.api_key()),
            Auth::Anonymous => builder,
        }
    }

    /// Sends the request and turns a non-success status into [`ElevenLabsError::Api`].
    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.bytes().await?;
            return Err(ElevenLabsError::Api {
                status,
                error: ApiError::from_body(body),
            });
        }

        Ok(response)
    }

    async fn send_json<T>(builder: RequestBuilder) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = Self::send(builder).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        let data = serde_json::from_slice(&body)?;

        Ok(ApiResponse {
            status,
            headers,
            data,
        })
    }

    /// Lists all voices available to the account.
    pub async fn get_voices(&self) -> Result<ApiResponse<Voices>> {
        Self::send_json(self.request(Method::GET, "/voices", Auth::ApiKey)).await
    }

    /// Creates a new voice from one or more base64 encoded samples.
    ///
    /// Samples are decoded before the request is built; invalid base64 fails
    /// with [`ElevenLabsError::Decode`] and nothing is sent.
    pub async fn add_voice(&self, voice: NewVoice) -> Result<ApiResponse<serde_json::Value>> {
        let form = voice.into_form()?;
        let builder = self
            .request(Method::POST, "/voices/add", Auth::ApiKey)
            .header(ACCEPT, APPLICATION_JSON)
            .multipart(form);

        Self::send_json(builder).await
    }

    /// Edits a voice. `voice_id` is never sent, even if `data` contains it.
    pub async fn edit_voice(
        &self,
        voice_id: &str,
        data: VoiceEdit,
    ) -> Result<ApiResponse<serde_json::Value>> {
        let path = voice_path(voice_id, "/edit");
        let builder = self
            .request(Method::POST, &path, Auth::ApiKey)
            .multipart(edit_voice_form(data));

        Self::send_json(builder).await
    }

    /// Default settings for new voices. Unlike every other call, this one is
    /// sent without the API key.
    pub async fn get_default_voice_settings(&self) -> Result<ApiResponse<Settings>> {
        let builder = self.request(Method::GET, "/voices/settings/default", Auth::Anonymous);
        Self::send_json(builder).await
    }

    pub async fn get_voice_settings(&self, voice_id: &str) -> Result<ApiResponse<Settings>> {
        let path = voice_path(voice_id, "/settings");
        Self::send_json(self.request(Method::GET, &path, Auth::ApiKey)).await
    }

    pub async fn get_voice(&self, voice_id: &str) -> Result<ApiResponse<Voice>> {
        let path = voice_path(voice_id, "");
        Self::send_json(self.request(Method::GET, &path, Auth::ApiKey)).await
    }

    /// Deletes a voice. The response body is returned as-is, undecoded.
    pub async fn delete_voice(&self, voice_id: &str) -> Result<ApiResponse<Bytes>> {
        let path = voice_path(voice_id, "");
        let response = Self::send(self.request(Method::DELETE, &path, Auth::ApiKey)).await?;

        Ok(ApiResponse {
            status: response.status(),
            headers: response.headers().clone(),
            data: response.bytes().await?,
        })
    }

    pub async fn edit_voice_settings(
        &self,
        voice_id: &str,
        stability: f64,
        similarity_boost: f64,
    ) -> Result<ApiResponse<Settings>> {
        let path = voice_path(voice_id, "/settings/edit");
        let body = EditVoiceSettingsRequest {
            stability,
            similarity_boost,
        };

        Self::send_json(self.request(Method::POST, &path, Auth::ApiKey).json(&body)).await
    }

    /// Converts text to speech and returns the whole audio file.
    pub async fn text_to_speech(
        &self,
        voice_id: &str,
        text: &str,
        model_id: Option<&str>,
        settings: Option<VoiceSettings>,
    ) -> Result<ApiResponse<Bytes>> {
        self.text_to_speech_with(voice_id, build_tts_request(text, model_id, settings))
            .await
    }

    pub async fn text_to_speech_with(
        &self,
        voice_id: &str,
        req: TextToSpeechRequest,
    ) -> Result<ApiResponse<Bytes>> {
        let response = Self::send(self.tts_request(voice_id, &req, false)).await?;

        Ok(ApiResponse {
            status: response.status(),
            headers: response.headers().clone(),
            data: response.bytes().await?,
        })
    }

    /// Converts text to speech and returns the audio as a stream of chunks.
    ///
    /// The body is not buffered; the caller owns the stream and decides how
    /// fast to read it.
    pub async fn text_to_speech_stream(
        &self,
        voice_id: &str,
        text: &str,
        model_id: Option<&str>,
        settings: Option<VoiceSettings>,
    ) -> Result<ApiResponse<AudioStream>> {
        self.text_to_speech_stream_with(voice_id, build_tts_request(text, model_id, settings))
            .await
    }

    pub async fn text_to_speech_stream_with(
        &self,
        voice_id: &str,
        req: TextToSpeechRequest,
    ) -> Result<ApiResponse<AudioStream>> {
        let response = Self::send(self.tts_request(voice_id, &req, true)).await?;
        let status = response.status();
        let headers = response.headers().clone();

        Ok(ApiResponse {
            status,
            headers,
            data: response.bytes_stream().map_err(ElevenLabsError::from).boxed(),
        })
    }

    fn tts_request(
        &self,
        voice_id: &str,
        req: &TextToSpeechRequest,
        stream: bool,
    ) -> RequestBuilder {
        self.request(Method::POST, &req.path(voice_id, stream), Auth::ApiKey)
            .header(ACCEPT, AUDIO_MPEG)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .json(req)
    }

    pub async fn get_models(&self) -> Result<ApiResponse<Vec<Model>>> {
        let builder = self
            .request(Method::GET, "/models", Auth::ApiKey)
            .header(ACCEPT, APPLICATION_JSON);

        Self::send_json(builder).await
    }

    /// Returns the account subscription.
    ///
    /// The endpoint answers with a single object; it is returned wrapped in a
    /// list (a list body is accepted too).
    pub async fn get_user_subscription(&self) -> Result<ApiResponse<Vec<Subscription>>> {
        let builder = self
            .request(Method::GET, "/user/subscription", Auth::ApiKey)
            .header(ACCEPT, APPLICATION_JSON);

        let response: ApiResponse<Subscriptions> = Self::send_json(builder).await?;
        Ok(response.map(|Subscriptions(subs)| subs))
    }
}

/// `/voices/{voice_id}{suffix}`, with the id percent-encoded as a single path segment.
fn voice_path(voice_id: &str, suffix: &str) -> String {
    format!("/voices/{}{suffix}", urlencoding::encode(voice_id))
}

fn build_tts_request(
    text: &str,
    model_id: Option<&str>,
    settings: Option<VoiceSettings>,
) -> TextToSpeechRequest {
    TextToSpeechRequest {
        text: text.to_string(),
        voice_settings: settings,
        model_id: model_id.map(str::to_string),
        output_format: None,
    }
}
