//! WAV materialization of captured fragments.

use std::io::Cursor;

use crate::error::{ClientError, Result};

/// Concatenate fragments into one 16-bit PCM WAV payload.
///
/// Fragments are written in arrival order at the device's native rate and
/// channel layout; nothing is resampled or mixed down. Zero fragments
/// yield a valid header-only file.
pub fn encode_wav(fragments: &[Vec<f32>], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec)
            .map_err(|e| ClientError::Capture(e.to_string()))?;
        for fragment in fragments {
            for &sample in fragment {
                let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer
                    .write_sample(value)
                    .map_err(|e| ClientError::Capture(e.to_string()))?;
            }
        }
        writer
            .finalize()
            .map_err(|e| ClientError::Capture(e.to_string()))?;
    }

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_round_trips_samples() {
        let fragments = vec![vec![0.0, 0.5], vec![-0.5, 1.0]];
        let bytes = encode_wav(&fragments, 44_100, 1).unwrap();

        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.spec().sample_rate, 44_100);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn test_encode_empty_recording_is_still_a_wav() {
        let bytes = encode_wav(&[], 16_000, 1).unwrap();
        let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
