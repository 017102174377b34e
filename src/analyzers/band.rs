/// Lower bound of the fixed pass band.
pub const PASS_BAND_FLOOR: f64 = 40.0;
/// Lower bound of the fixed merit band.
pub const MERIT_BAND_FLOOR: f64 = 60.0;
/// Lower bound of the fixed distinction band.
pub const DISTINCTION_BAND_FLOOR: f64 = 70.0;

/// Fixed reporting band a grade falls into, independent of user thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Fail,
    Pass,
    Merit,
    Distinction,
}

/// Classifies a grade into its fixed band.
///
/// | Range       | Band        |
/// |-------------|-------------|
/// | >= 70       | Distinction |
/// | >= 60       | Merit       |
/// | >= 40       | Pass        |
/// | < 40        | Fail        |
pub fn band(g: f64) -> Band {
    match g {
        g if g >= DISTINCTION_BAND_FLOOR => Band::Distinction,
        g if g >= MERIT_BAND_FLOOR => Band::Merit,
        g if g >= PASS_BAND_FLOOR => Band::Pass,
        _ => Band::Fail,
    }
}
