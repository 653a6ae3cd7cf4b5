use std::sync::Arc;
use std::thread;

use mfg_face_core::{
    active_expression, get_channel, set_channel, zero_channels, AnimStateLock, ChannelKind,
    FaceChannels, InMemoryChannels, MODIFIER_COUNT, PHONEME_COUNT,
};

#[test]
fn every_percent_round_trips_through_a_locked_state() {
    let state = AnimStateLock::new(InMemoryChannels::new());
    let mut guard = state.lock().unwrap();
    for p in -20..=220 {
        for (kind, id) in [(ChannelKind::Phoneme, 0), (ChannelKind::Modifier, 13)] {
            set_channel(&mut *guard, kind, id, p).unwrap();
            assert_eq!(get_channel(&*guard, kind, id), p.clamp(0, 200), "{kind} {p}");
        }
    }
}

#[test]
fn concurrent_writers_never_observe_a_torn_override() {
    // The override sequence (flag off, value, flag on) runs under one guard,
    // so a reader holding the lock always sees the flag on after the first write.
    let state = AnimStateLock::shared(InMemoryChannels::new());
    {
        let mut guard = state.lock().unwrap();
        set_channel(&mut *guard, ChannelKind::Expression, 1, 10).unwrap();
    }

    let writers: Vec<_> = (0..4u32)
        .map(|t| {
            let state = Arc::clone(&state);
            thread::spawn(move || {
                for i in 0..200 {
                    let mut guard = state.lock().unwrap();
                    set_channel(&mut *guard, ChannelKind::Expression, t, i % 200).unwrap();
                }
            })
        })
        .collect();

    for _ in 0..500 {
        let guard = state.lock().unwrap();
        assert!(guard.expression_override_enabled());
    }
    for w in writers {
        w.join().unwrap();
    }
}

#[test]
fn zeroing_a_partially_populated_rig_is_not_an_error() {
    let mut channels = InMemoryChannels::with_counts(8, 4, 17);
    channels.set_phoneme(7, 1.0);
    zero_channels(&mut channels, ChannelKind::Phoneme).unwrap();
    zero_channels(&mut channels, ChannelKind::Modifier).unwrap();
    assert!(channels.values(ChannelKind::Phoneme).iter().all(|v| *v == 0.0));
    assert_eq!(channels.values(ChannelKind::Phoneme).len(), 8);
    assert!(PHONEME_COUNT > 8 && MODIFIER_COUNT > 4);
}

#[test]
fn active_expression_follows_the_heaviest_mood() {
    let mut channels = InMemoryChannels::new();
    channels.set_expression_weights(&[0.0, 0.1, 0.0, 0.0, 0.8, 0.3]);
    assert_eq!(active_expression(&channels), 4);
    set_channel(&mut channels, ChannelKind::Expression, 12, 40).unwrap();
    assert_eq!(active_expression(&channels), 12);
}
