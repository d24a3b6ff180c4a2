//! Hover/tap tones
//!
//! Each button gets a note from a pentatonic scale; every further six buttons
//! the scale is raised by another half of its base pitch (x1.5, x2.0, ...).
//! The tone is a sine that drops an octave while fading out. The simulation
//! never waits on audio: the host drains tone events after the tick and hands
//! them to `AudioManager` on the web.

/// C major pentatonic plus the upper C (Hz)
pub const PENTATONIC_SCALE: [f32; 6] = [261.63, 293.66, 329.63, 392.00, 440.00, 523.25];

/// Everything needed to schedule one button tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    /// Starting frequency (Hz)
    pub frequency: f32,
    /// Frequency at the end of the ramp (Hz)
    pub end_frequency: f32,
    /// Gain at note-on, before volume
    pub gain: f32,
    /// Gain at the end of the ramp (must stay above 0 for exponential ramps)
    pub end_gain: f32,
    /// Ramp length (seconds)
    pub ramp: f64,
    /// Oscillator stops after this long (seconds)
    pub duration: f64,
}

impl ToneSpec {
    pub fn for_index(index: usize) -> Self {
        let frequency = tone_frequency(index);
        Self {
            frequency,
            end_frequency: frequency * 0.5,
            gain: 0.2,
            end_gain: 0.001,
            ramp: 0.4,
            duration: 0.5,
        }
    }
}

/// Note for the button at `index`
pub fn tone_frequency(index: usize) -> f32 {
    let base = PENTATONIC_SCALE[index % PENTATONIC_SCALE.len()];
    let register = (index / PENTATONIC_SCALE.len()) as f32;
    base * (1.0 + register * 0.5)
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::ToneSpec;

    /// Web Audio tone player
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - tones disabled");
            }
            Self { ctx, volume: 0.8 }
        }

        /// Volume after mute (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        /// Play the tone for button `index`
        pub fn play_tone(&self, index: usize) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let spec = ToneSpec::for_index(index);
            let Some((osc, gain)) = create_osc(ctx, spec.frequency) else {
                log::warn!("Could not build oscillator for button {}", index);
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(spec.frequency, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(spec.end_frequency, t + spec.ramp)
                .ok();

            gain.gain().set_value_at_time(spec.gain * self.volume, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(spec.end_gain, t + spec.ramp)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + spec.duration).ok();
        }
    }

    /// Sine oscillator routed through a gain node to the speakers
    fn create_osc(ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
