use crate::types::PcmAudio;

/// Average each frame's channels into one mono sample.
///
/// Mono input passes through unchanged (as `f64`). The average discards
/// any inter-channel differences.
pub fn downmix_to_mono(audio: &PcmAudio) -> Vec<f64> {
    let channels = audio.channels as usize;
    if channels <= 1 {
        return audio.samples.iter().map(|&s| s as f64).collect();
    }

    audio
        .samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().map(|&s| s as f64).sum::<f64>() / channels as f64)
        .collect()
}

/// Requantize to 16-bit, clamping to `[-32768, 32767]` before truncating
/// toward zero. NaN maps to 0.
pub fn to_i16_saturating(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| {
            if s.is_nan() {
                0
            } else {
                s.clamp(i16::MIN as f64, i16::MAX as f64) as i16
            }
        })
        .collect()
}
