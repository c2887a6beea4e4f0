pub mod butterworth;
pub mod direct_form;
pub mod filter;
pub mod math;
pub mod preprocess;
pub mod quantize;
pub mod sos;

pub use butterworth::{TransferFunction, design_lowpass};
pub use direct_form::{DirectFormFilter, lfilter};
pub use filter::Filter;
pub use math::{level_change_db, peak_abs, rms};
pub use preprocess::{Normalization, peak_normalize, select_first_channel};
pub use quantize::{clamp_unit, dequantize_i16, quantize_i16};
pub use sos::SosLowpass;
