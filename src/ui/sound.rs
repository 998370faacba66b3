/// Sound engine: short 8-bit style jingles via rodio.
///
/// Each effect is a tune of sine notes queued on its own Sink. In-game
/// effects are detached and never block the prompt; the win and death
/// jingles block until they finish.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

use crate::sim::event::GameEvent;

/// One sound effect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Effect {
    Coin,
    Hit,
    Miss,
    Checkpoint,
    Die,
    Clear,
}

impl Effect {
    /// Closing jingles play to the end before returning; the process
    /// exits right after them and would cut them off otherwise.
    pub fn blocks(self) -> bool {
        matches!(self, Effect::Die | Effect::Clear)
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::time::Duration;

    use log::{debug, warn};
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Effect;

    /// (frequency Hz, length ms) notes, played back to back.
    type Tune = &'static [(f32, u64)];

    const COIN: Tune = &[(1047.0, 45), (1319.0, 45), (1568.0, 70)]; // C6 E6 G6
    const HIT: Tune = &[(494.0, 35), (330.0, 35), (196.0, 60)];
    const MISS: Tune = &[(220.0, 60)];
    const CHECKPOINT: Tune = &[(784.0, 80), (1047.0, 150)]; // G5 C6
    const DIE: Tune = &[(440.0, 120), (370.0, 120), (311.0, 120), (261.0, 260)];
    const CLEAR: Tune = &[(523.0, 100), (659.0, 100), (784.0, 100), (1047.0, 350)];

    const VOLUME: f32 = 0.25;

    fn tune(effect: Effect) -> Tune {
        match effect {
            Effect::Coin => COIN,
            Effect::Hit => HIT,
            Effect::Miss => MISS,
            Effect::Checkpoint => CHECKPOINT,
            Effect::Die => DIE,
            Effect::Clear => CLEAR,
        }
    }

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl SoundEngine {
        pub fn new() -> Option<Self> {
            match OutputStream::try_default() {
                Ok((stream, handle)) => Some(SoundEngine { _stream: stream, handle }),
                Err(e) => {
                    warn!("no audio output, sound disabled: {e}");
                    None
                }
            }
        }

        pub fn play(&self, effect: Effect) {
            let sink = match Sink::try_new(&self.handle) {
                Ok(s) => s,
                Err(e) => {
                    debug!("sound skipped: {e}");
                    return;
                }
            };
            for &(freq, ms) in tune(effect) {
                sink.append(
                    SineWave::new(freq)
                        .take_duration(Duration::from_millis(ms))
                        .amplify(VOLUME),
                );
            }
            if effect.blocks() {
                sink.sleep_until_end();
            } else {
                sink.detach(); // fire-and-forget
            }
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _effect: Effect) {}
}

/// Effect for one event, if it has one.
pub fn effect_for(event: &GameEvent) -> Option<Effect> {
    match event {
        GameEvent::CoinCollected { .. } => Some(Effect::Coin),
        GameEvent::CheckpointReached { .. } => Some(Effect::Checkpoint),
        GameEvent::Attacked(outcome) if outcome.hit() => Some(Effect::Hit),
        GameEvent::Attacked(_) => Some(Effect::Miss),
        GameEvent::GoalReached => Some(Effect::Clear),
        GameEvent::HitMonster => Some(Effect::Die),
        GameEvent::Moved { .. } | GameEvent::HelpRequested | GameEvent::Quit => None,
    }
}

/// Play the effect for each event of one step.
pub fn play_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for effect in events.iter().filter_map(effect_for) {
        sfx.play(effect);
    }
}
