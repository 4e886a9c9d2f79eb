//! The device seam: how the capture side talks to a microphone.
//!
//! Implementations deliver audio fragments into a shared sink as they
//! arrive and hand back a stream handle that owns the device. Stopping the
//! handle is the only way the device is released, which keeps the
//! "no dangling capture after stop" guarantee in one place.

use std::sync::{Arc, Mutex};

use crate::error::Result;

/// Ordered fragments appended by the device callback, exactly as they
/// arrive. Concatenated (never reordered or resampled) when the recording
/// is materialized.
pub type FragmentSink = Arc<Mutex<Vec<Vec<f32>>>>;

/// A source of microphone audio.
pub trait MicrophoneInput: Send + Sync {
    /// Request microphone access and start capturing into `sink`.
    ///
    /// `device_name` of `None` means the system default input.
    ///
    /// # Errors
    /// [`crate::ClientError::PermissionDenied`] when access is refused or
    /// no usable input device exists. Refusal leaves everything else
    /// untouched; the caller may simply retry.
    fn open(&self, device_name: Option<&str>, sink: FragmentSink)
    -> Result<Box<dyn MicrophoneStream>>;
}

/// A live capture stream. Owns the underlying device resources.
pub trait MicrophoneStream: Send {
    /// Sample rate of the delivered fragments, in Hz.
    fn sample_rate(&self) -> u32;

    /// Interleaved channel count of the delivered fragments.
    fn channels(&self) -> u16;

    /// Stop capturing and release the device. Blocks until the underlying
    /// stream is torn down.
    fn stop(self: Box<Self>);
}
