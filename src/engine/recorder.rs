#![allow(dead_code)]

use std::time::Instant;

use uuid::Uuid;

use crate::anticheat::checksum::generate_checksum;
use crate::models::{GameData, InputEvent, InputKind};

/// Records player inputs with millisecond offsets for server-side
/// verification. Single-owner, one instance per session.
#[derive(Debug)]
pub struct InputRecorder {
    session_id: Uuid,
    inputs: Vec<InputEvent>,
    started_at: Option<Instant>,
    recording: bool,
}

impl InputRecorder {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            inputs: Vec::new(),
            started_at: None,
            recording: false,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Clear prior state and mark t=0 at the current instant.
    pub fn start(&mut self) {
        self.inputs.clear();
        self.started_at = Some(Instant::now());
        self.recording = true;
    }

    /// Freeze recording. Later `record` calls are silently dropped; a late
    /// input after a game-over transition must not corrupt the log.
    pub fn stop(&mut self) {
        self.recording = false;
    }

    pub fn record(&mut self, kind: InputKind, data: Option<serde_json::Value>) {
        if !self.recording {
            return;
        }
        let offset = match self.started_at {
            Some(start) => start.elapsed().as_millis() as u64,
            None => return,
        };
        self.inputs.push(InputEvent::new(offset, kind, data));
    }

    pub fn inputs(&self) -> &[InputEvent] {
        &self.inputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Offset of the last recorded event; zero when nothing was recorded.
    pub fn duration(&self) -> u64 {
        self.inputs.last().map(|e| e.t).unwrap_or(0)
    }

    /// Digest binding this input log to the session seed.
    pub fn checksum(&self, seed: u32) -> Result<String, serde_json::Error> {
        generate_checksum(&self.inputs, seed)
    }

    /// Package the finalized record for submission.
    pub fn export_game_data(
        &self,
        game_id: &str,
        seed: u32,
        final_score: u64,
    ) -> Result<GameData, serde_json::Error> {
        Ok(GameData {
            session_id: self.session_id,
            game_id: game_id.to_string(),
            seed,
            inputs: self.inputs.clone(),
            final_score,
            checksum: self.checksum(seed)?,
            duration: self.duration(),
        })
    }
}
