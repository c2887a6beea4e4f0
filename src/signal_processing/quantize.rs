use crate::constants::I16_FULL_SCALE;

/// Clip samples to [-1, 1] in place, returning how many were clipped.
pub fn clamp_unit(samples: &mut [f32]) -> usize {
    let mut clipped = 0;
    for sample in samples.iter_mut() {
        if *sample > 1.0 || *sample < -1.0 {
            *sample = sample.clamp(-1.0, 1.0);
            clipped += 1;
        }
    }
    clipped
}

/// Convert to signed 16-bit PCM: `round(clamp(x) * 32767)`.
pub fn quantize_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * I16_FULL_SCALE).round() as i16)
        .collect()
}

/// Inverse of `quantize_i16`, up to one quantization step.
pub fn dequantize_i16(samples: &[i16]) -> Vec<f32> {
    samples.iter().map(|&s| s as f32 / I16_FULL_SCALE).collect()
}
