//! Shared test doubles and fixtures for the mfg crates.
//!
//! - [`FakeActor`]: an actor backed by [`InMemoryChannels`] that records speed
//!   calls and face-state lookups, and can unload its face mid-test.
//! - [`FakeConversation`] / [`Speaker`]: a settable dialogue speaker.
//! - [`presets`]: named expression presets from `fixtures/presets.json`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use mfg_console::{Actor, ActorRef, ConversationContextProvider, SceneObject};
use mfg_face_core::{
    active_expression, get_channel, set_channel, AnimStateLock, ChannelKind, InMemoryChannels,
};
use once_cell::sync::Lazy;
use serde::Deserialize;

static PRESETS: Lazy<PresetFile> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/presets.json");
    serde_json::from_str(raw).expect("preset fixtures should parse")
});

#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: HashMap<String, Vec<f32>>,
}

pub mod presets {
    use super::*;
    use mfg_face_core::ExpressionPreset;

    pub fn keys() -> Vec<String> {
        PRESETS.presets.keys().cloned().collect()
    }

    /// Raw values, whatever their length.
    pub fn values(name: &str) -> Result<Vec<f32>> {
        PRESETS
            .presets
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown preset fixture '{name}'"))
    }

    pub fn preset(name: &str) -> Result<ExpressionPreset> {
        let values = values(name)?;
        ExpressionPreset::from_slice(&values).map_err(|e| anyhow!("preset fixture '{name}': {e}"))
    }
}

/// Actor double with an optional, unloadable face.
pub struct FakeActor {
    name: Option<String>,
    face: Mutex<Option<Arc<AnimStateLock>>>,
    speeds: Mutex<Vec<f32>>,
    lookups: AtomicUsize,
}

impl FakeActor {
    pub fn new(name: &str) -> Arc<Self> {
        Self::with_channels(name, InMemoryChannels::new())
    }

    pub fn with_channels(name: &str, channels: InMemoryChannels) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.to_string()),
            face: Mutex::new(Some(AnimStateLock::shared(channels))),
            speeds: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        })
    }

    /// Actor whose face resource never loaded.
    pub fn faceless(name: &str) -> Arc<Self> {
        let actor = Self::new(name);
        actor.unload_face();
        actor
    }

    /// Actor whose base record has no name.
    pub fn nameless() -> Arc<Self> {
        Arc::new(Self {
            name: None,
            face: Mutex::new(Some(AnimStateLock::shared(InMemoryChannels::new()))),
            speeds: Mutex::new(Vec::new()),
            lookups: AtomicUsize::new(0),
        })
    }

    pub fn actor_ref(self: &Arc<Self>) -> ActorRef {
        self.clone()
    }

    pub fn unload_face(&self) {
        *self.face.lock().expect("face lock") = None;
    }

    /// Face state without counting a lookup.
    pub fn face(&self) -> Arc<AnimStateLock> {
        self.face
            .lock()
            .expect("face lock")
            .clone()
            .expect("fake actor has no face loaded")
    }

    /// Current value of one channel in percent.
    pub fn percent(&self, kind: ChannelKind, id: u32) -> i32 {
        let face = self.face();
        let guard = face.lock().expect("anim state lock");
        get_channel(&*guard, kind, id)
    }

    pub fn active_mood(&self) -> u32 {
        let face = self.face();
        let guard = face.lock().expect("anim state lock");
        active_expression(&*guard)
    }

    pub fn override_enabled(&self) -> bool {
        let face = self.face();
        let guard = face.lock().expect("anim state lock");
        guard.expression_override_enabled()
    }

    /// Write a channel directly, as another writer on the main thread would.
    pub fn write_percent(&self, kind: ChannelKind, id: u32, percent: i32) {
        let face = self.face();
        let mut guard = face.lock().expect("anim state lock");
        set_channel(&mut *guard, kind, id, percent).expect("fixture write in range");
    }

    pub fn speeds(&self) -> Vec<f32> {
        self.speeds.lock().expect("speed log").clone()
    }

    /// How many times the face state was resolved through [`Actor`].
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Lock acquisitions on the face state so far.
    pub fn lock_count(&self) -> u64 {
        self.face().acquisitions()
    }
}

impl Actor for FakeActor {
    fn base_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn face_anim_state(&self) -> Option<Arc<AnimStateLock>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.face.lock().expect("face lock").clone()
    }

    fn set_expression_speed(&self, speed: f32) {
        self.speeds.lock().expect("speed log").push(speed);
    }
}

/// A dialogue speaker: either an actor or some other scene object.
pub struct Speaker {
    actor: Option<ActorRef>,
}

impl Speaker {
    pub fn actor(actor: ActorRef) -> Arc<Self> {
        Arc::new(Self { actor: Some(actor) })
    }

    /// A talking object that is not an actor (e.g. an activator).
    pub fn object() -> Arc<Self> {
        Arc::new(Self { actor: None })
    }
}

impl SceneObject for Speaker {
    fn as_actor(&self) -> Option<ActorRef> {
        self.actor.clone()
    }
}

#[derive(Default)]
pub struct FakeConversation {
    speaker: Mutex<Option<Arc<dyn SceneObject>>>,
}

impl FakeConversation {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_speaker(&self, speaker: Option<Arc<dyn SceneObject>>) {
        *self.speaker.lock().expect("speaker lock") = speaker;
    }
}

impl ConversationContextProvider for FakeConversation {
    fn speaker(&self) -> Option<Arc<dyn SceneObject>> {
        self.speaker.lock().expect("speaker lock").clone()
    }
}
