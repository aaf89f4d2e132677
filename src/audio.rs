//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a single sine oscillator described by a `Tone`; the
//! simulation's events decide which effect plays.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Tower fires
    Shoot,
    /// Projectile strikes an enemy
    Hit,
    /// Enemy destroyed
    EnemyDeath,
    /// Tower bought
    TowerPlaced,
}

/// Shape of a synthesized blip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Starting frequency (Hz)
    pub freq: f32,
    /// Frequency at the end of the sound (Hz); equal to `freq` for a steady pitch
    pub end_freq: f32,
    /// Length in seconds
    pub duration: f64,
    /// Peak gain before volume settings (0-1)
    pub gain: f32,
    /// Exponential decay rate over the sound's length (0 = flat envelope)
    pub decay: f32,
}

impl Tone {
    /// Gain left at the end of the envelope
    pub fn tail_gain(&self) -> f32 {
        self.gain * (-self.decay).exp()
    }
}

impl SoundEffect {
    /// Which effect, if any, an event should trigger
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::ProjectileFired { .. } => Some(SoundEffect::Shoot),
            GameEvent::ProjectileHit { .. } => Some(SoundEffect::Hit),
            GameEvent::EnemyKilled { .. } => Some(SoundEffect::EnemyDeath),
            GameEvent::TowerPlaced { .. } => Some(SoundEffect::TowerPlaced),
            GameEvent::EnemySpawned { .. } | GameEvent::EnemyLeaked { .. } => None,
        }
    }

    /// Synthesis parameters (sample counts from a 22.05 kHz reference)
    pub fn tone(&self) -> Tone {
        const RATE: f64 = 22050.0;
        match self {
            SoundEffect::Shoot => Tone {
                freq: 440.0,
                end_freq: 440.0,
                duration: 1000.0 / RATE,
                gain: 0.3,
                decay: 5.0,
            },
            SoundEffect::Hit => Tone {
                freq: 220.0,
                end_freq: 220.0,
                duration: 800.0 / RATE,
                gain: 0.4,
                decay: 3.0,
            },
            SoundEffect::EnemyDeath => Tone {
                freq: 110.0,
                end_freq: 60.0,
                duration: 1500.0 / RATE,
                gain: 0.3,
                decay: 2.0,
            },
            SoundEffect::TowerPlaced => Tone {
                freq: 330.0,
                end_freq: 330.0,
                duration: 1200.0 / RATE,
                gain: 0.2,
                decay: 0.0,
            },
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Tone};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Gain applied on top of each tone (0 when muted)
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: Settings::default().effective_sfx_volume(),
            }
        }

        /// Pick up volume and mute preferences
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            self.play_tone(ctx, &effect.tone(), vol);
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.duration;

            gain.gain().set_value_at_time(vol * tone.gain, t).ok();
            if tone.decay > 0.0 {
                // Exponential ramps cannot reach zero
                let tail = (vol * tone.tail_gain()).max(0.001);
                gain.gain().exponential_ramp_to_value_at_time(tail, end).ok();
            }
            if tone.end_freq != tone.freq {
                osc.frequency().set_value_at_time(tone.freq, t).ok();
                osc.frequency()
                    .linear_ramp_to_value_at_time(tone.end_freq, end)
                    .ok();
            }

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_event_sound_mapping() {
        let fired = GameEvent::ProjectileFired {
            tower: 0,
            projectile: 0,
            target: 0,
        };
        assert_eq!(SoundEffect::for_event(&fired), Some(SoundEffect::Shoot));
        let killed = GameEvent::EnemyKilled {
            enemy: 0,
            position: Vec2::ZERO,
        };
        assert_eq!(SoundEffect::for_event(&killed), Some(SoundEffect::EnemyDeath));
        let placed = GameEvent::TowerPlaced {
            tower: 0,
            position: Vec2::ZERO,
        };
        assert_eq!(SoundEffect::for_event(&placed), Some(SoundEffect::TowerPlaced));
        assert_eq!(SoundEffect::for_event(&GameEvent::EnemyLeaked { enemy: 0 }), None);
    }

    #[test]
    fn test_tones_are_short_blips() {
        for effect in [
            SoundEffect::Shoot,
            SoundEffect::Hit,
            SoundEffect::EnemyDeath,
            SoundEffect::TowerPlaced,
        ] {
            let tone = effect.tone();
            assert!(tone.duration > 0.03 && tone.duration < 0.1, "{effect:?}");
            assert!(tone.gain > 0.0 && tone.gain <= 0.4);
            assert!(tone.tail_gain() <= tone.gain);
        }
        let death = SoundEffect::EnemyDeath.tone();
        assert!(death.end_freq < death.freq);
        assert_eq!(SoundEffect::TowerPlaced.tone().tail_gain(), 0.2);
    }
}
