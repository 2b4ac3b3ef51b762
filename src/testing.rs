//! In-memory port fakes shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::context::ServiceContext;
use crate::error::ContentError;
use crate::ports::clock::{Clock, SleepFuture, Sleeper};
use crate::ports::genai_client::{
    ClientFactory, GenAiClient, GenerateImagesRequest, GenerateImagesResponse,
    GenerateVideosRequest, GenerateVideosResponse, GeneratedImage, GeneratedVideo, Image,
    Operation, Video,
};
use crate::ports::image_fetcher::{FetchedBytes, ImageFetcher};
use crate::ports::PortFuture;

type Scripted<T> = Mutex<VecDeque<Result<T, ContentError>>>;

fn pop<T>(queue: &Scripted<T>, method: &str) -> Result<T, ContentError> {
    queue.lock().unwrap().pop_front().unwrap_or_else(|| {
        Err(ContentError::Api { status: 500, message: format!("fake {method} exhausted") })
    })
}

/// A not-yet-finished operation named `name`.
pub fn pending(name: &str) -> Operation {
    Operation { name: name.into(), done: false, response: None, error: None }
}

/// A finished operation carrying one video with `bytes`.
pub fn finished_with_video(name: &str, bytes: &[u8]) -> Operation {
    Operation {
        name: name.into(),
        done: true,
        response: Some(GenerateVideosResponse {
            generated_videos: vec![GeneratedVideo {
                video: Video { video_bytes: bytes.to_vec(), mime_type: Some("video/mp4".into()) },
            }],
        }),
        error: None,
    }
}

/// An image response carrying one image per entry of `images`.
pub fn images_response(images: &[&[u8]]) -> GenerateImagesResponse {
    GenerateImagesResponse {
        generated_images: images
            .iter()
            .map(|bytes| GeneratedImage {
                image: Image { image_bytes: bytes.to_vec(), mime_type: Some("image/png".into()) },
            })
            .collect(),
    }
}

/// Scripted client that records every request it receives.
#[derive(Default)]
pub struct FakeClient {
    images: Scripted<GenerateImagesResponse>,
    video_starts: Scripted<Operation>,
    operations: Scripted<Operation>,
    image_requests: Mutex<Vec<GenerateImagesRequest>>,
    video_requests: Mutex<Vec<GenerateVideosRequest>>,
    fetched_operations: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn push_images(&self, response: GenerateImagesResponse) {
        self.images.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_images_error(&self, error: ContentError) {
        self.images.lock().unwrap().push_back(Err(error));
    }

    pub fn push_video_start(&self, operation: Operation) {
        self.video_starts.lock().unwrap().push_back(Ok(operation));
    }

    pub fn push_operation(&self, operation: Operation) {
        self.operations.lock().unwrap().push_back(Ok(operation));
    }

    pub fn push_operation_error(&self, error: ContentError) {
        self.operations.lock().unwrap().push_back(Err(error));
    }

    pub fn image_requests(&self) -> Vec<GenerateImagesRequest> {
        self.image_requests.lock().unwrap().clone()
    }

    pub fn video_requests(&self) -> Vec<GenerateVideosRequest> {
        self.video_requests.lock().unwrap().clone()
    }

    pub fn operation_fetches(&self) -> Vec<String> {
        self.fetched_operations.lock().unwrap().clone()
    }
}

impl GenAiClient for FakeClient {
    fn generate_images(
        &self,
        request: &GenerateImagesRequest,
    ) -> PortFuture<'_, GenerateImagesResponse> {
        self.image_requests.lock().unwrap().push(request.clone());
        let result = pop(&self.images, "generate_images");
        Box::pin(async move { result })
    }

    fn generate_videos(&self, request: &GenerateVideosRequest) -> PortFuture<'_, Operation> {
        self.video_requests.lock().unwrap().push(request.clone());
        let result = pop(&self.video_starts, "generate_videos");
        Box::pin(async move { result })
    }

    fn get_operation(&self, name: &str) -> PortFuture<'_, Operation> {
        self.fetched_operations.lock().unwrap().push(name.to_string());
        let result = pop(&self.operations, "get_operation");
        Box::pin(async move { result })
    }
}

/// Hands out one shared [`FakeClient`] and counts how often it is asked to.
pub struct FakeFactory {
    pub client: Arc<FakeClient>,
    creates: AtomicUsize,
}

impl FakeFactory {
    pub fn new(client: Arc<FakeClient>) -> Self {
        Self { client, creates: AtomicUsize::new(0) }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }
}

impl ClientFactory for FakeFactory {
    fn create(&self, _provider: &str, api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError> {
        assert!(!api_key.is_empty(), "factory reached without a key");
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.client) as Arc<dyn GenAiClient>)
    }
}

/// Factory that always fails to build a client.
pub struct BrokenFactory;

impl ClientFactory for BrokenFactory {
    fn create(&self, provider: &str, _api_key: &str) -> Result<Arc<dyn GenAiClient>, ContentError> {
        Err(ContentError::Provider {
            provider: provider.to_string(),
            message: "client library unavailable".into(),
        })
    }
}

/// Serves scripted downloads and records requested URLs.
#[derive(Default)]
pub struct FakeFetcher {
    responses: Scripted<FetchedBytes>,
    urls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn push(&self, bytes: &[u8]) {
        self.responses.lock().unwrap().push_back(Ok(FetchedBytes(bytes.to_vec())));
    }

    pub fn push_error(&self, error: ContentError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl ImageFetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> PortFuture<'_, FetchedBytes> {
        self.urls.lock().unwrap().push(url.to_string());
        let result = pop(&self.responses, "fetch");
        Box::pin(async move { result })
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self { now: Mutex::new(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()) }
    }
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Returns immediately and remembers each requested duration.
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        self.sleeps.lock().unwrap().push(duration);
        Box::pin(std::future::ready(()))
    }
}

/// Advances a [`ManualClock`] instead of waiting.
pub struct AdvancingSleeper {
    clock: Arc<ManualClock>,
}

impl AdvancingSleeper {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self { clock }
    }
}

impl Sleeper for AdvancingSleeper {
    fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
        self.clock.advance(duration);
        Box::pin(std::future::ready(()))
    }
}

/// Fakes wired into a [`ServiceContext`], kept around for assertions.
pub struct Harness {
    pub client: Arc<FakeClient>,
    pub factory: Arc<FakeFactory>,
    pub fetcher: Arc<FakeFetcher>,
    pub sleeper: Arc<RecordingSleeper>,
    pub clock: Arc<ManualClock>,
}

impl Default for Harness {
    fn default() -> Self {
        let client = Arc::new(FakeClient::default());
        Self {
            factory: Arc::new(FakeFactory::new(Arc::clone(&client))),
            client,
            fetcher: Arc::new(FakeFetcher::default()),
            sleeper: Arc::new(RecordingSleeper::default()),
            clock: Arc::new(ManualClock::default()),
        }
    }
}

impl Harness {
    pub fn context(&self) -> ServiceContext {
        ServiceContext {
            clients: Arc::clone(&self.factory) as Arc<dyn ClientFactory>,
            fetcher: Arc::clone(&self.fetcher) as Arc<dyn ImageFetcher>,
            clock: Arc::clone(&self.clock) as Arc<dyn Clock>,
            sleeper: Arc::clone(&self.sleeper) as Arc<dyn Sleeper>,
        }
    }
}
