use super::butterworth::TransferFunction;
use super::filter::Filter;

/// Direct-form evaluator for a `TransferFunction`
///
/// Uses the transposed direct form II structure: one delay line of
/// `order` elements shared by the feedforward and feedback paths. State
/// starts at zero and persists across `process` calls until `reset`.
pub struct DirectFormFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    state: Vec<f64>,
}

impl DirectFormFilter {
    pub fn new(tf: &TransferFunction) -> Self {
        let len = tf.b().len().max(tf.a().len());
        let mut b = tf.b().to_vec();
        let mut a = tf.a().to_vec();
        b.resize(len, 0.0);
        a.resize(len, 0.0);

        Self {
            b,
            a,
            state: vec![0.0; len - 1],
        }
    }

    /// Clear the filter memory
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }

    fn step(&mut self, x: f64) -> f64 {
        let len = self.b.len();
        let y = self.b[0] * x + self.state.first().copied().unwrap_or(0.0);
        for i in 1..len {
            let carried = if i < len - 1 { self.state[i] } else { 0.0 };
            self.state[i - 1] = self.b[i] * x - self.a[i] * y + carried;
        }
        y
    }
}

impl Filter for DirectFormFilter {
    fn process(&mut self, sample: f32) -> f32 {
        self.step(sample as f64) as f32
    }
}

/// Filter `input` with zero initial conditions.
///
/// The output always has the same length as the input.
pub fn lfilter(tf: &TransferFunction, input: &[f32]) -> Vec<f32> {
    let mut filter = DirectFormFilter::new(tf);
    let mut output = input.to_vec();
    filter.process_buffer(&mut output);
    output
}
