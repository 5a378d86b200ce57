//! End-to-end controller scenarios
//!
//! The serial camera is scripted against a manual clock, the recognition
//! service is a mock server and the inventory lives in a temp dir.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fridge_sentry::application::ports::{
    Announcer, ButtonPanel, Camera, Clock, InventoryStore, Led, LightSensor, PanelError,
    PlaybackOutcome, SerialError, SerialLink, SpeechError, StatusLeds,
};
use fridge_sentry::application::{
    CycleOutcome, EventLoop, Hardware, ImageFramer, Services, CAPTURE_COMMAND,
    RECOGNITION_FAILURE_TEXT,
};
use fridge_sentry::domain::capture::{CaptureError, END_MARKER, MAX_FRAME_SIZE};
use fridge_sentry::domain::control::{ButtonState, LightGate, LightReading, PendingAction};
use fridge_sentry::infrastructure::{
    JsonInventoryStore, ManualClock, OpenAiRecognizer, SerialCamera,
};

/// Camera module stand-in: answers each capture command with the next scripted reply
struct CameraModule {
    clock: Arc<ManualClock>,
    tick_ms: u64,
    replies: VecDeque<Vec<u8>>,
    pending: VecDeque<u8>,
    commands: Arc<Mutex<Vec<String>>>,
}

impl CameraModule {
    fn new(clock: Arc<ManualClock>, replies: Vec<Vec<u8>>) -> Self {
        Self {
            clock,
            tick_ms: 1,
            replies: replies.into(),
            pending: VecDeque::new(),
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_tick(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }
}

impl SerialLink for CameraModule {
    fn send_line(&mut self, line: &str) -> Result<(), SerialError> {
        self.commands.lock().unwrap().push(line.to_string());
        if let Some(reply) = self.replies.pop_front() {
            self.pending.extend(reply);
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        self.clock.advance(self.tick_ms);
        Ok(self.pending.pop_front())
    }

    fn discard_pending(&mut self) -> Result<(), SerialError> {
        self.pending.clear();
        Ok(())
    }
}

fn framed(image: &[u8]) -> Vec<u8> {
    let mut bytes = image.to_vec();
    bytes.extend_from_slice(&END_MARKER);
    bytes
}

struct Sensor(u16);

impl LightSensor for Sensor {
    fn read(&mut self) -> Result<LightReading, PanelError> {
        Ok(LightReading(self.0))
    }
}

/// Presses the scripted buttons once each, then nothing
struct Buttons(VecDeque<ButtonState>);

impl ButtonPanel for Buttons {
    fn sample(&mut self) -> ButtonState {
        self.0.pop_front().unwrap_or_default()
    }
}

#[derive(Clone, Default)]
struct Leds(Arc<Mutex<Vec<(Led, bool)>>>);

impl StatusLeds for Leds {
    fn set(&mut self, led: Led, on: bool) {
        self.0.lock().unwrap().push((led, on));
    }
}

#[derive(Clone, Default)]
struct Speaker(Arc<Mutex<Vec<String>>>);

#[async_trait]
impl Announcer for Speaker {
    async fn announce(&self, text: &str) -> Result<PlaybackOutcome, SpeechError> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(PlaybackOutcome::Finished)
    }
}

fn completion(content: &str) -> serde_json::Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

async fn recognition_server(label: &str, sentence: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("image_url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(label)))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(sentence)))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn insert_then_remove_round_trip() {
    let temp = TempDir::new().unwrap();
    let server = recognition_server("Milk", "The milk is in the fridge.").await;
    let clock = Arc::new(ManualClock::new());

    let module = CameraModule::new(
        Arc::clone(&clock),
        vec![framed(&[0xFF, 0xD8, 1, 2, 3]), framed(&[0xFF, 0xD8, 4, 5])],
    );
    let commands = Arc::clone(&module.commands);
    let camera = SerialCamera::new(ImageFramer::new(module, Arc::clone(&clock)));

    let inventory_path = temp.path().join("inventory.json");
    let leds = Leds::default();
    let speaker = Speaker::default();

    let mut controller = EventLoop::new(
        LightGate::default(),
        Hardware {
            sensor: Sensor(100),
            buttons: Buttons(
                vec![ButtonState::new(true, false), ButtonState::new(false, true)].into(),
            ),
            leds: leds.clone(),
        },
        Services {
            camera,
            recognizer: OpenAiRecognizer::new("test-key").with_base_url(server.uri()),
            inventory: JsonInventoryStore::open(&inventory_path).await.unwrap(),
            announcer: speaker.clone(),
        },
    );

    match controller.step().await {
        CycleOutcome::Completed(report) => {
            assert_eq!(report.action, PendingAction::Insert);
            assert_eq!(report.label, "Milk");
            assert!(report.recognized);
            assert!(report.stored);
            assert_eq!(report.frame_bytes, 5);
            assert_eq!(report.announcement, Some(PlaybackOutcome::Finished));
        }
        other => panic!("Expected completed insert, got {:?}", other),
    }

    let stored = JsonInventoryStore::open(&inventory_path).await.unwrap();
    assert_eq!(stored.snapshot().await.unwrap().count("Milk"), 1);

    match controller.step().await {
        CycleOutcome::Completed(report) => {
            assert_eq!(report.action, PendingAction::Remove);
            assert_eq!(report.frame_bytes, 4);
        }
        other => panic!("Expected completed remove, got {:?}", other),
    }

    assert_eq!(controller.step().await, CycleOutcome::Idle);

    let stored = JsonInventoryStore::open(&inventory_path).await.unwrap();
    assert!(stored.snapshot().await.unwrap().is_empty());

    assert_eq!(
        *commands.lock().unwrap(),
        vec![CAPTURE_COMMAND.to_string(), CAPTURE_COMMAND.to_string()]
    );
    assert_eq!(
        *speaker.0.lock().unwrap(),
        vec!["The milk is in the fridge.".to_string(); 2]
    );
    assert!(leds.0.lock().unwrap().contains(&(Led::Busy, true)));
}

#[tokio::test]
async fn silent_camera_skips_the_action() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let clock = Arc::new(ManualClock::new());

    let module = CameraModule::new(Arc::clone(&clock), vec![]);
    let camera = SerialCamera::new(ImageFramer::new(module, Arc::clone(&clock)));
    let speaker = Speaker::default();

    let mut controller = EventLoop::new(
        LightGate::default(),
        Hardware {
            sensor: Sensor(0),
            buttons: Buttons(vec![ButtonState::new(true, false)].into()),
            leds: Leds::default(),
        },
        Services {
            camera,
            recognizer: OpenAiRecognizer::new("test-key").with_base_url(server.uri()),
            inventory: JsonInventoryStore::open(temp.path().join("inventory.json"))
                .await
                .unwrap(),
            announcer: speaker.clone(),
        },
    );

    match controller.step().await {
        CycleOutcome::CaptureFailed(CaptureError::TimedOut { received, .. }) => {
            assert_eq!(received, 0);
        }
        other => panic!("Expected capture timeout, got {:?}", other),
    }

    assert!(clock.now_ms() > 5000);
    assert!(speaker.0.lock().unwrap().is_empty());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn recognition_outage_still_records_placeholder() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let clock = Arc::new(ManualClock::new());

    let module = CameraModule::new(Arc::clone(&clock), vec![framed(&[0xFF, 0xD8])]);
    let camera = SerialCamera::new(ImageFramer::new(module, Arc::clone(&clock)));
    let speaker = Speaker::default();
    let inventory_path = temp.path().join("inventory.json");

    let mut controller = EventLoop::new(
        LightGate::default(),
        Hardware {
            sensor: Sensor(10),
            buttons: Buttons(vec![ButtonState::new(true, false)].into()),
            leds: Leds::default(),
        },
        Services {
            camera,
            recognizer: OpenAiRecognizer::new("test-key").with_base_url(server.uri()),
            inventory: JsonInventoryStore::open(&inventory_path).await.unwrap(),
            announcer: speaker.clone(),
        },
    );

    match controller.step().await {
        CycleOutcome::Completed(report) => {
            assert!(!report.recognized);
            assert_eq!(report.label, RECOGNITION_FAILURE_TEXT);
        }
        other => panic!("Expected completed action, got {:?}", other),
    }

    let stored = JsonInventoryStore::open(&inventory_path).await.unwrap();
    assert_eq!(
        stored.snapshot().await.unwrap().count(RECOGNITION_FAILURE_TEXT),
        1
    );
    assert_eq!(
        *speaker.0.lock().unwrap(),
        vec![RECOGNITION_FAILURE_TEXT.to_string()]
    );
}

#[tokio::test]
async fn oversized_image_overflows() {
    let clock = Arc::new(ManualClock::new());
    let module = CameraModule::new(Arc::clone(&clock), vec![vec![0xAB; MAX_FRAME_SIZE + 10]])
        .with_tick(0);
    let camera = SerialCamera::new(ImageFramer::new(module, Arc::clone(&clock)));

    let result = camera.capture().await;
    assert_eq!(
        result.unwrap_err(),
        CaptureError::Overflowed {
            capacity: MAX_FRAME_SIZE
        }
    );
}

#[tokio::test]
async fn closed_fridge_ignores_buttons() {
    let temp = TempDir::new().unwrap();
    let server = MockServer::start().await;
    let clock = Arc::new(ManualClock::new());

    let module = CameraModule::new(Arc::clone(&clock), vec![framed(&[1])]);
    let commands = Arc::clone(&module.commands);
    let camera = SerialCamera::new(ImageFramer::new(module, Arc::clone(&clock)));

    let mut controller = EventLoop::new(
        LightGate::default(),
        Hardware {
            sensor: Sensor(4000),
            buttons: Buttons(vec![ButtonState::new(true, false)].into()),
            leds: Leds::default(),
        },
        Services {
            camera,
            recognizer: OpenAiRecognizer::new("test-key").with_base_url(server.uri()),
            inventory: JsonInventoryStore::open(temp.path().join("inventory.json"))
                .await
                .unwrap(),
            announcer: Speaker::default(),
        },
    );

    assert_eq!(controller.step().await, CycleOutcome::Closed);
    assert!(commands.lock().unwrap().is_empty());
}
