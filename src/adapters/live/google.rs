//! Live adapter for the Google Generative Language API (Imagen and Veo).

use std::sync::Arc;

use base64::Engine;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ContentError;
use crate::ports::genai_client::{
    ClientFactory, GenAiClient, GenerateImagesRequest, GenerateImagesResponse,
    GenerateVideosRequest, GenerateVideosResponse, GeneratedImage, GeneratedVideo, Image,
    Operation, OperationError, Video,
};
use crate::ports::PortFuture;

/// Default REST endpoint.
pub const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Builds [`GoogleGenAiClient`] sessions.
pub struct GoogleClientFactory {
    base_url: String,
}

impl GoogleClientFactory {
    /// Factory targeting `base_url`, or the public endpoint when `None`.
    #[must_use]
    pub fn new(base_url: Option<&str>) -> Self {
        Self { base_url: base_url.unwrap_or(GOOGLE_API_BASE).trim_end_matches('/').to_string() }
    }
}

impl ClientFactory for GoogleClientFactory {
    fn create(&self, provider: &str, api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError> {
        let client = Client::builder().build().map_err(|e| ContentError::Provider {
            provider: provider.to_string(),
            message: format!("HTTP client unavailable: {e}"),
        })?;
        Ok(Arc::new(GoogleGenAiClient {
            client,
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
        }))
    }
}

/// Live client that calls the Google AI REST API.
pub struct GoogleGenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoogleGenAiClient {
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ContentError> {
        let response = request.header("x-goog-api-key", &self.api_key).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ContentError::Api { status: status.as_u16(), message: response_text });
        }

        serde_json::from_str(&response_text).map_err(|e| ContentError::Api {
            status: status.as_u16(),
            message: format!("Failed to parse response: {e}. Body: {}", truncate(&response_text)),
        })
    }

    async fn download(&self, uri: &str) -> Result<Vec<u8>, ContentError> {
        let response = self.client.get(uri).header("x-goog-api-key", &self.api_key).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentError::Api { status: status.as_u16(), message });
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Convert a wire operation, downloading any videos only referenced by URI.
    async fn resolve_operation(&self, wire: WireOperation) -> Result<Operation, ContentError> {
        let mut response = None;
        if let Some(body) = wire.response {
            let mut generated_videos = Vec::new();
            for sample in body.generate_video_response.generated_samples {
                let video_bytes = match (sample.video.bytes_base64_encoded, sample.video.uri) {
                    (Some(b64), _) => decode_base64(&b64)?,
                    (None, Some(uri)) => self.download(&uri).await?,
                    (None, None) => continue,
                };
                generated_videos.push(GeneratedVideo {
                    video: Video { video_bytes, mime_type: sample.video.mime_type },
                });
            }
            response = Some(GenerateVideosResponse { generated_videos });
        }

        Ok(Operation {
            name: wire.name,
            done: wire.done,
            response,
            error: wire.error.map(|e| OperationError { code: e.code, message: e.message }),
        })
    }
}

impl GenAiClient for GoogleGenAiClient {
    fn generate_images(
        &self,
        request: &GenerateImagesRequest,
    ) -> PortFuture<'_, GenerateImagesResponse> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/models/{}:predict", self.base_url, request.model);
            let body = serde_json::json!({
                "instances": [{ "prompt": request.prompt }],
                "parameters": {
                    "sampleCount": request.config.number_of_images,
                    "aspectRatio": request.config.aspect_ratio,
                }
            });

            let parsed: PredictResponse = self.send_json(self.client.post(&url).json(&body)).await?;

            let mut generated_images = Vec::with_capacity(parsed.predictions.len());
            for prediction in parsed.predictions {
                let Some(b64) = prediction.bytes_base64_encoded else { continue };
                generated_images.push(GeneratedImage {
                    image: Image {
                        image_bytes: decode_base64(&b64)?,
                        mime_type: prediction.mime_type,
                    },
                });
            }

            Ok(GenerateImagesResponse { generated_images })
        })
    }

    fn generate_videos(&self, request: &GenerateVideosRequest) -> PortFuture<'_, Operation> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/models/{}:predictLongRunning", self.base_url, request.model);

            let mut instance = serde_json::json!({ "prompt": request.prompt });
            if let Some(ref image) = request.image {
                let mime_type = image
                    .mime_type
                    .clone()
                    .unwrap_or_else(|| sniff_image_mime(&image.image_bytes).to_string());
                instance["image"] = serde_json::json!({
                    "bytesBase64Encoded":
                        base64::engine::general_purpose::STANDARD.encode(&image.image_bytes),
                    "mimeType": mime_type,
                });
            }

            let body = serde_json::json!({
                "instances": [instance],
                "parameters": {
                    "aspectRatio": request.config.aspect_ratio,
                    "personGeneration": request.config.person_generation,
                }
            });

            let wire: WireOperation = self.send_json(self.client.post(&url).json(&body)).await?;
            self.resolve_operation(wire).await
        })
    }

    fn get_operation(&self, name: &str) -> PortFuture<'_, Operation> {
        let url = format!("{}/{}", self.base_url, name.trim_start_matches('/'));
        Box::pin(async move {
            let wire: WireOperation = self.send_json(self.client.get(&url)).await?;
            self.resolve_operation(wire).await
        })
    }
}

fn decode_base64(data: &str) -> Result<Vec<u8>, ContentError> {
    base64::engine::general_purpose::STANDARD.decode(data).map_err(|e| ContentError::Api {
        status: 200,
        message: format!("Failed to decode base64: {e}"),
    })
}

fn truncate(text: &str) -> String {
    if text.len() > 500 {
        let mut end = 500;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &text[..end])
    } else {
        text.to_string()
    }
}

/// Guess an image MIME type from its magic bytes, defaulting to PNG.
fn sniff_image_mime(data: &[u8]) -> &'static str {
    infer::get(data)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map_or("image/png", |kind| kind.mime_type())
}

// --- Google API response types ---

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Deserialize)]
struct WireOperation {
    name: String,
    #[serde(default)]
    done: bool,
    response: Option<WireVideoResponse>,
    error: Option<WireOperationError>,
}

#[derive(Deserialize)]
struct WireOperationError {
    code: Option<i32>,
    message: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireVideoResponse {
    #[serde(default)]
    generate_video_response: WireGeneratedSamples,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct WireGeneratedSamples {
    #[serde(default)]
    generated_samples: Vec<WireSample>,
}

#[derive(Deserialize)]
struct WireSample {
    video: WireVideo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVideo {
    uri: Option<String>,
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::genai_client::{GenerateImagesConfig, GenerateVideosConfig};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn live_client(server: &MockServer) -> Arc<dyn GenAiClient> {
        GoogleClientFactory::new(Some(&server.uri())).create("veo", "test-api-key").unwrap()
    }

    fn video_request(image: Option<Image>) -> GenerateVideosRequest {
        GenerateVideosRequest {
            model: "veo-3.1-generate-001".into(),
            prompt: "waves at dusk".into(),
            image,
            config: GenerateVideosConfig {
                aspect_ratio: "16:9".into(),
                person_generation: "allow_adult".into(),
            },
        }
    }

    #[test]
    fn factory_trims_base_url() {
        let factory = GoogleClientFactory::new(Some("http://localhost:8080/v1beta/"));
        assert_eq!(factory.base_url, "http://localhost:8080/v1beta");
        assert_eq!(GoogleClientFactory::new(None).base_url, GOOGLE_API_BASE);
    }

    #[test]
    fn sniff_common_formats() {
        assert_eq!(sniff_image_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_image_mime(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_image_mime(b"GIF89a"), "image/gif");
        assert_eq!(sniff_image_mime(b"BM\x3a\0\0\0\0\0\0\0\x36\0\0\0"), "image/bmp");
        assert_eq!(
            sniff_image_mime(b"\0\0\0\x1cftypavif\0\0\0\0avifmif1miaf"),
            "image/avif"
        );
        assert_eq!(
            sniff_image_mime(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            "image/png"
        );
    }

    #[test]
    fn sniff_falls_back_to_png() {
        assert_eq!(sniff_image_mime(&[]), "image/png");
        assert_eq!(sniff_image_mime(b"plain text"), "image/png");
        assert_eq!(sniff_image_mime(b"%PDF-1.7"), "image/png");
    }

    #[test]
    fn parse_pending_operation() {
        let wire: WireOperation =
            serde_json::from_str(r#"{"name": "models/veo-3.1-generate-001/operations/abc"}"#)
                .unwrap();
        assert!(!wire.done);
        assert!(wire.response.is_none());
    }

    #[test]
    fn parse_finished_operation() {
        let wire: WireOperation = serde_json::from_str(
            r#"{
                "name": "operations/abc",
                "done": true,
                "response": {
                    "@type": "type.googleapis.com/google.ai.generativelanguage.v1beta.PredictLongRunningResponse",
                    "generateVideoResponse": {
                        "generatedSamples": [{"video": {"uri": "https://files/abc:download?alt=media"}}]
                    }
                }
            }"#,
        )
        .unwrap();
        assert!(wire.done);
        let samples = wire.response.unwrap().generate_video_response.generated_samples;
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].video.uri.as_deref(), Some("https://files/abc:download?alt=media"));
    }

    #[test]
    fn parse_filtered_predictions() {
        let parsed: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.predictions.is_empty());
    }

    #[test]
    fn truncate_long_bodies() {
        let long = "x".repeat(600);
        let t = truncate(&long);
        assert_eq!(t.len(), 503);
        assert!(t.ends_with("..."));
        assert_eq!(truncate("short"), "short");
    }

    #[tokio::test]
    async fn converts_inline_samples_without_download() {
        let google = GoogleGenAiClient {
            client: Client::new(),
            base_url: "http://127.0.0.1:9".into(),
            api_key: "key".into(),
        };
        let wire: WireOperation = serde_json::from_str(
            r#"{"name": "operations/x", "done": true, "response": {"generateVideoResponse":
                {"generatedSamples": [{"video": {"bytesBase64Encoded": "AAAAGGZ0eXBtcDQy", "mimeType": "video/mp4"}}]}}}"#,
        )
        .unwrap();
        let op = google.resolve_operation(wire).await.unwrap();
        let videos = op.response.unwrap().generated_videos;
        assert_eq!(videos.len(), 1);
        assert_eq!(&videos[0].video.video_bytes[4..8], b"ftyp");
        assert_eq!(videos[0].video.mime_type.as_deref(), Some("video/mp4"));
    }

    #[tokio::test]
    async fn predict_sends_key_and_decodes_images() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/imagen-3.0-generate-002:predict"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_json(json!({
                "instances": [{ "prompt": "a lighthouse" }],
                "parameters": { "sampleCount": 2, "aspectRatio": "1:1" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predictions": [
                    { "bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png" },
                    { "raiFilteredReason": "blocked" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = GenerateImagesRequest {
            model: "imagen-3.0-generate-002".into(),
            prompt: "a lighthouse".into(),
            config: GenerateImagesConfig { number_of_images: 2, aspect_ratio: "1:1".into() },
        };
        let response = live_client(&server).generate_images(&request).await.unwrap();

        assert_eq!(response.generated_images.len(), 1);
        let image = &response.generated_images[0].image;
        assert_eq!(&image.image_bytes[1..4], b"PNG");
        assert_eq!(image.mime_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn predict_long_running_sends_seed_frame() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/veo-3.1-generate-001:predictLongRunning"))
            .and(header("x-goog-api-key", "test-api-key"))
            .and(body_json(json!({
                "instances": [{
                    "prompt": "waves at dusk",
                    "image": { "bytesBase64Encoded": "/9j/4A==", "mimeType": "image/jpeg" }
                }],
                "parameters": { "aspectRatio": "16:9", "personGeneration": "allow_adult" }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "name": "operations/veo-7" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let seed = Image { image_bytes: vec![0xFF, 0xD8, 0xFF, 0xE0], mime_type: None };
        let operation =
            live_client(&server).generate_videos(&video_request(Some(seed))).await.unwrap();

        assert_eq!(operation.name, "operations/veo-7");
        assert!(!operation.done);
        assert!(operation.response.is_none());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/veo-3.1-generate-001:predictLongRunning"))
            .respond_with(ResponseTemplate::new(429).set_body_string("RESOURCE_EXHAUSTED: quota"))
            .mount(&server)
            .await;

        let err = live_client(&server).generate_videos(&video_request(None)).await.unwrap_err();

        match err {
            ContentError::Api { status, message } => {
                assert_eq!(status, 429);
                assert!(message.contains("RESOURCE_EXHAUSTED"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn finished_operation_downloads_video_by_uri() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/operations/veo-7"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "operations/veo-7",
                "done": true,
                "response": {
                    "generateVideoResponse": {
                        "generatedSamples": [
                            { "video": { "uri": format!("{}/files/clip:download?alt=media", server.uri()) } }
                        ]
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/clip:download"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\0\0\0\x18ftypmp42".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let operation = live_client(&server).get_operation("operations/veo-7").await.unwrap();

        assert!(operation.done);
        let videos = operation.response.unwrap().generated_videos;
        assert_eq!(videos.len(), 1);
        assert_eq!(&videos[0].video.video_bytes[4..8], b"ftyp");
    }

    #[tokio::test]
    async fn failed_download_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/operations/veo-8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "operations/veo-8",
                "done": true,
                "response": {
                    "generateVideoResponse": {
                        "generatedSamples": [
                            { "video": { "uri": format!("{}/files/gone:download", server.uri()) } }
                        ]
                    }
                }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files/gone:download"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = live_client(&server).get_operation("operations/veo-8").await.unwrap_err();
        assert!(matches!(err, ContentError::Api { status: 403, .. }));
    }
}
