//! cpal-backed microphone input.
//!
//! `cpal::Stream` is not `Send`, so the stream lives on a dedicated
//! capture thread: the thread builds the stream, reports the negotiated
//! format back over a channel, then parks until it is told to stop.
//! Dropping the stream on that thread is what releases the device.

use std::sync::mpsc;
use std::thread;

use anyhow::Result as AnyResult;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use serde::Serialize;

use super::microphone::{FragmentSink, MicrophoneInput, MicrophoneStream};
use crate::error::{ClientError, Result};

/// An input device as shown to the user.
#[derive(Debug, Clone, Serialize)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// List all available audio input devices on the system.
///
/// # Errors
/// Returns an error if enumeration fails or no input devices are found.
pub fn list_input_devices() -> AnyResult<Vec<AudioDeviceInfo>> {
    let host = cpal::default_host();
    let default_name = host
        .default_input_device()
        .and_then(|d| d.description().ok())
        .map(|d| d.to_string());

    let mut devices = Vec::new();
    for device in host.input_devices()? {
        if let Ok(desc) = device.description() {
            let name = desc.to_string();
            devices.push(AudioDeviceInfo {
                is_default: default_name.as_ref() == Some(&name),
                name,
            });
        }
    }

    if devices.is_empty() {
        anyhow::bail!("No audio input devices found");
    }

    Ok(devices)
}

/// Microphone input backed by the system audio host.
#[derive(Debug, Default, Clone)]
pub struct SystemMicrophone;

impl MicrophoneInput for SystemMicrophone {
    fn open(
        &self,
        device_name: Option<&str>,
        sink: FragmentSink,
    ) -> Result<Box<dyn MicrophoneStream>> {
        let device_name = device_name.map(String::from);
        let (ready_tx, ready_rx) = mpsc::channel();
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let worker = thread::spawn(move || {
            match open_stream(device_name.as_deref(), sink) {
                Ok((stream, sample_rate, channels)) => {
                    if ready_tx.send(Ok((sample_rate, channels))).is_err() {
                        return;
                    }
                    // Park until stop. Receiving an Err means the handle was
                    // dropped, which counts as a stop too.
                    let _ = stop_rx.recv();
                    drop(stream);
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            }
        });

        let (sample_rate, channels) = ready_rx
            .recv()
            .map_err(|_| ClientError::PermissionDenied("capture thread exited".into()))??;

        Ok(Box::new(SystemMicrophoneStream {
            stop_tx,
            worker: Some(worker),
            sample_rate,
            channels,
        }))
    }
}

struct SystemMicrophoneStream {
    stop_tx: mpsc::Sender<()>,
    worker: Option<thread::JoinHandle<()>>,
    sample_rate: u32,
    channels: u16,
}

impl MicrophoneStream for SystemMicrophoneStream {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn stop(mut self: Box<Self>) {
        let _ = self.stop_tx.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for SystemMicrophoneStream {
    fn drop(&mut self) {
        // A dropped handle still tears the stream down; stop() only adds
        // the blocking join.
        let _ = self.stop_tx.send(());
    }
}

/// Open an input stream on the requested device and start it.
fn open_stream(
    device_name: Option<&str>,
    sink: FragmentSink,
) -> Result<(Stream, u32, u16)> {
    let device = find_device(device_name)?;

    let supported = device
        .default_input_config()
        .map_err(|e| ClientError::PermissionDenied(e.to_string()))?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.config();
    let sample_rate = config.sample_rate;
    let channels = config.channels;

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, sink)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, sink)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, sink)?,
        other => {
            return Err(ClientError::PermissionDenied(format!(
                "unsupported sample format: {other:?}"
            )));
        }
    };

    stream
        .play()
        .map_err(|e| ClientError::PermissionDenied(e.to_string()))?;

    Ok((stream, sample_rate, channels))
}

fn find_device(device_name: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();

    let Some(wanted) = device_name else {
        return host.default_input_device().ok_or_else(|| {
            ClientError::PermissionDenied("no default input device available".into())
        });
    };

    let devices = host
        .input_devices()
        .map_err(|e| ClientError::PermissionDenied(e.to_string()))?;
    for device in devices {
        if let Ok(desc) = device.description() {
            if desc.to_string() == wanted {
                return Ok(device);
            }
        }
    }

    Err(ClientError::PermissionDenied(format!(
        "input device '{wanted}' not found"
    )))
}

/// Build an input stream that appends each callback buffer to the sink as
/// one fragment, converting samples to f32.
fn build_stream<T>(device: &Device, config: &StreamConfig, sink: FragmentSink) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample,
    f32: cpal::FromSample<T>,
{
    let err_fn = |err| {
        crate::verbose!("audio stream error (non-fatal): {err}");
    };

    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let fragment: Vec<f32> =
                    data.iter().map(|&s| cpal::Sample::from_sample(s)).collect();
                if !fragment.is_empty() {
                    match sink.lock() {
                        Ok(mut fragments) => fragments.push(fragment),
                        Err(_) => crate::verbose!("fragment sink poisoned, dropping fragment"),
                    }
                }
            },
            err_fn,
            None,
        )
        .map_err(|e| ClientError::PermissionDenied(e.to_string()))?;

    Ok(stream)
}
