//! External collaborators.
//!
//! The core never touches hardware directly. Everything it needs from the
//! rest of the firmware - suspending the audio duty during a control
//! exchange, reading parameter values, resetting the inference sub-module -
//! comes in through this trait.

/// Hooks into the surrounding firmware.
pub trait Board {
    /// Suspends the concurrent audio-processing duty. Called before a chunk
    /// is handled while the session is idle.
    fn audio_pause(&mut self);

    /// Resumes the audio duty. Called after handling a chunk whenever the
    /// session has returned to idle.
    fn audio_resume(&mut self);

    /// Resets the unrelated sub-module behind the `reset` command.
    fn reset(&mut self);

    /// Reads the named parameter or timing values (envelope, knob, feature,
    /// inference, ...). `None` for an unknown key.
    fn param(&self, key: &str) -> Option<Vec<f32>>;
}
