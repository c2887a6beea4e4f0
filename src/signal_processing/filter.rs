/// A causal low-pass run sample by sample.
///
/// Implementors start from zero internal state on construction, so the first
/// output depends only on the first input. Each call to [`Filter::process`]
/// advances the state by one sample. State carries over between calls, which
/// means splitting a signal across several `process_buffer` calls gives the
/// same result as filtering it in one pass.
pub trait Filter {
    /// Filter one sample and return the corresponding output.
    fn process(&mut self, sample: f32) -> f32;

    /// Replace every sample with its filtered value; length is unchanged.
    fn process_buffer(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
