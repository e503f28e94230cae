/// Plain arithmetic helpers.
pub struct Calculator;

impl Calculator {
    #[must_use]
    pub fn multiply(a: f64, b: f64) -> f64 {
        a * b
    }

    /// Returns `None` when `b` is zero.
    #[must_use]
    pub fn divide(a: f64, b: f64) -> Option<f64> {
        if b == 0.0 { None } else { Some(a / b) }
    }
}
