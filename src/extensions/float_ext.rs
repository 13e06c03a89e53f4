/// A trait to round floating point values to a fixed number of decimals, e.g. for presenting
/// distances in an API response.
pub trait RoundTo {
    /// Returns `self` rounded half away from zero to `decimals` decimal places.
    fn round_to(self, decimals: u32) -> Self;
}

macro_rules! impl_round_to {
    ($($t:ty)*) => ($(
        impl RoundTo for $t {
            fn round_to(self, decimals: u32) -> $t {
                let factor = (10 as $t).powi(decimals as i32);
                (self * factor).round() / factor
            }
        }
    )*)
}

impl_round_to! { f32 f64 }
