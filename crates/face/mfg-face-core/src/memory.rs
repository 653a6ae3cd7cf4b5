//! Plain-vector face channel state.
//!
//! Behaves like the engine structure as seen through [`FaceChannels`]: writes
//! past the populated count are dropped, an expression override replaces the
//! natural mood blend with a single weighted mood, and `reset` zeroes
//! everything. Used by headless hosts, benches and tests.

use log::debug;

use crate::channels::{ChannelKind, EXPRESSION_COUNT, MODIFIER_COUNT, PHONEME_COUNT};
use crate::handle::FaceChannels;

#[derive(Clone, Debug, PartialEq)]
pub struct InMemoryChannels {
    phonemes: Vec<f32>,
    modifiers: Vec<f32>,
    expressions: Vec<f32>,
    override_enabled: bool,
    /// Last override written, as (mood, value).
    override_value: Option<(u32, f32)>,
}

impl Default for InMemoryChannels {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryChannels {
    /// Fully populated state: 16 phonemes, 14 modifiers, 17 moods, all zero.
    pub fn new() -> Self {
        Self::with_counts(PHONEME_COUNT, MODIFIER_COUNT, EXPRESSION_COUNT)
    }

    /// State with explicit populated counts, e.g. a face rig that only ships a few moods.
    pub fn with_counts(phonemes: usize, modifiers: usize, expressions: usize) -> Self {
        Self {
            phonemes: vec![0.0; phonemes],
            modifiers: vec![0.0; modifiers],
            expressions: vec![0.0; expressions],
            override_enabled: false,
            override_value: None,
        }
    }

    /// Overwrite the natural expression weights, as the host's own blend would.
    pub fn set_expression_weights(&mut self, weights: &[f32]) {
        for (slot, w) in self.expressions.iter_mut().zip(weights) {
            *slot = *w;
        }
    }

    /// Last override written, if any.
    pub fn expression_override(&self) -> Option<(u32, f32)> {
        self.override_value
    }

    fn slot(values: &mut [f32], kind: ChannelKind, id: usize) -> Option<&mut f32> {
        let len = values.len();
        let slot = values.get_mut(id);
        if slot.is_none() {
            debug!("{kind} {id} is past the populated count {len}; write dropped");
        }
        slot
    }
}

impl FaceChannels for InMemoryChannels {
    fn values(&self, kind: ChannelKind) -> &[f32] {
        match kind {
            ChannelKind::Phoneme => &self.phonemes,
            ChannelKind::Modifier => &self.modifiers,
            ChannelKind::Expression => &self.expressions,
        }
    }

    fn set_phoneme(&mut self, id: usize, value: f32) {
        if let Some(slot) = Self::slot(&mut self.phonemes, ChannelKind::Phoneme, id) {
            *slot = value;
        }
    }

    fn set_modifier(&mut self, id: usize, value: f32) {
        if let Some(slot) = Self::slot(&mut self.modifiers, ChannelKind::Modifier, id) {
            *slot = value;
        }
    }

    fn set_expression_override(&mut self, mood: u32, value: f32) {
        self.override_value = Some((mood, value));
        // Override drives a single mood; the others fall to zero.
        for w in self.expressions.iter_mut() {
            *w = 0.0;
        }
        let mood = mood as usize;
        if let Some(slot) = Self::slot(&mut self.expressions, ChannelKind::Expression, mood) {
            *slot = value;
        }
    }

    fn expression_override_enabled(&self) -> bool {
        self.override_enabled
    }

    fn set_expression_override_enabled(&mut self, enabled: bool) {
        self.override_enabled = enabled;
    }

    fn clear_expression_override(&mut self) {
        self.override_enabled = false;
        self.override_value = None;
    }

    fn reset(&mut self) {
        for values in [&mut self.phonemes, &mut self.modifiers, &mut self.expressions] {
            values.iter_mut().for_each(|v| *v = 0.0);
        }
        self.override_enabled = false;
        self.override_value = None;
    }
}
