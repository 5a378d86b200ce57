//! Controller event loop
//!
//! One iteration: read the light gate, resolve the buttons and, for a
//! single pressed button, run capture -> recognize -> store -> announce.
//! Every step is awaited before the next one starts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::capture::CaptureError;
use crate::domain::control::{LightGate, PendingAction};
use crate::domain::inventory::{Instruction, Inventory};
use crate::domain::timing::Duration;

use super::ports::{
    Announcer, ButtonPanel, Camera, InventoryStore, Led, LightSensor, PlaybackOutcome,
    Recognizer, StatusLeds,
};

/// Text used in place of any answer the recognition service failed to give
pub const RECOGNITION_FAILURE_TEXT: &str = "Error communicating with the API";

/// Pause between iterations while the enclosure is open
pub const ACTIVE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Local hardware of the controller
pub struct Hardware<S, B, L>
where
    S: LightSensor,
    B: ButtonPanel,
    L: StatusLeds,
{
    pub sensor: S,
    pub buttons: B,
    pub leds: L,
}

/// Remote and storage collaborators of the controller
pub struct Services<C, R, I, A>
where
    C: Camera,
    R: Recognizer,
    I: InventoryStore,
    A: Announcer,
{
    pub camera: C,
    pub recognizer: R,
    pub inventory: I,
    pub announcer: A,
}

/// Summary of one processed button press
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub action: PendingAction,
    /// Label used for storage and announcement
    pub label: String,
    /// False if the placeholder text was used as label
    pub recognized: bool,
    /// Whether the inventory store accepted the change
    pub stored: bool,
    /// Playback result, None if the announcement could not be played
    pub announcement: Option<PlaybackOutcome>,
    pub frame_bytes: usize,
}

/// Result of one loop iteration
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Gate closed, nothing else evaluated
    Closed,
    /// Gate open but no single button pressed
    Idle,
    /// The capture attempt ended without a frame
    CaptureFailed(CaptureError),
    Completed(ActionReport),
}

/// Single-threaded controller loop
pub struct EventLoop<S, B, L, C, R, I, A>
where
    S: LightSensor,
    B: ButtonPanel,
    L: StatusLeds,
    C: Camera,
    R: Recognizer,
    I: InventoryStore,
    A: Announcer,
{
    gate: LightGate,
    hardware: Hardware<S, B, L>,
    services: Services<C, R, I, A>,
    idle_interval: Duration,
}

impl<S, B, L, C, R, I, A> EventLoop<S, B, L, C, R, I, A>
where
    S: LightSensor,
    B: ButtonPanel,
    L: StatusLeds,
    C: Camera,
    R: Recognizer,
    I: InventoryStore,
    A: Announcer,
{
    pub fn new(gate: LightGate, hardware: Hardware<S, B, L>, services: Services<C, R, I, A>) -> Self {
        Self {
            gate,
            hardware,
            services,
            idle_interval: Duration::idle_interval(),
        }
    }

    pub fn with_idle_interval(mut self, idle_interval: Duration) -> Self {
        self.idle_interval = idle_interval;
        self
    }

    /// Run iterations until `shutdown` is set
    pub async fn run(&mut self, shutdown: Arc<AtomicBool>) {
        info!(threshold = self.gate.threshold(), "Controller started");

        while !shutdown.load(Ordering::SeqCst) {
            let pause = match self.step().await {
                CycleOutcome::Closed => self.idle_interval,
                _ => ACTIVE_POLL_INTERVAL,
            };
            tokio::time::sleep(pause.as_std()).await;
        }

        self.hardware.leds.set(Led::Busy, false);
        self.hardware.leds.set(Led::Gate, false);
        info!("Controller stopped");
    }

    /// Run a single iteration
    pub async fn step(&mut self) -> CycleOutcome {
        let open = match self.hardware.sensor.read() {
            Ok(reading) => self.gate.is_open(reading),
            Err(e) => {
                warn!("{}", e);
                false
            }
        };

        if !open {
            self.hardware.leds.set(Led::Gate, false);
            return CycleOutcome::Closed;
        }
        self.hardware.leds.set(Led::Gate, true);

        let buttons = self.hardware.buttons.sample();
        let action = buttons.action();
        if action.is_none() {
            if buttons.insert_pressed && buttons.remove_pressed {
                debug!("Both buttons pressed, ignoring");
            }
            return CycleOutcome::Idle;
        }

        info!(%action, "Button pressed");
        self.hardware.leds.set(Led::Busy, true);
        let outcome = self.process(action).await;
        self.hardware.leds.set(Led::Busy, false);
        outcome
    }

    async fn process(&self, action: PendingAction) -> CycleOutcome {
        let services = &self.services;

        let frame = match services.camera.capture().await {
            Ok(frame) => frame,
            Err(e) => {
                warn!(%action, "Skipping action: {}", e);
                return CycleOutcome::CaptureFailed(e);
            }
        };

        let inventory = services.inventory.snapshot().await.unwrap_or_else(|e| {
            warn!("{}", e);
            Inventory::new()
        });

        let (label, recognized) = match services
            .recognizer
            .recognize(&frame, &Instruction::recognition(&inventory))
            .await
        {
            Ok(label) => (label, true),
            Err(e) => {
                warn!("Recognition failed: {}", e);
                (RECOGNITION_FAILURE_TEXT.to_string(), false)
            }
        };
        info!(%label, "Product recognized");

        let stored = self.store(action, &label).await;

        let text = services
            .recognizer
            .phrase(&Instruction::announcement(action, &label))
            .await
            .unwrap_or_else(|e| {
                warn!("Announcement phrasing failed: {}", e);
                RECOGNITION_FAILURE_TEXT.to_string()
            });
        debug!(%text, "Announcing");

        let announcement = match services.announcer.announce(&text).await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Announcement failed: {}", e);
                None
            }
        };

        if let Ok(inventory) = services.inventory.snapshot().await {
            info!(products = inventory.len(), "Inventory:\n{}", inventory.listing());
        }

        CycleOutcome::Completed(ActionReport {
            action,
            label,
            recognized,
            stored,
            announcement,
            frame_bytes: frame.len(),
        })
    }

    async fn store(&self, action: PendingAction, label: &str) -> bool {
        let inventory = &self.services.inventory;
        let result = match action {
            PendingAction::Insert => inventory.add(label).await.map(|count| {
                debug!(%label, count, "Added to inventory");
            }),
            PendingAction::Remove => inventory.remove(label).await.map(|removed| {
                if !removed {
                    info!(%label, "Removed product was not in inventory");
                }
            }),
            PendingAction::None => Ok(()),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}
