use std::ops::RangeInclusive;

use crate::error::{EngineError, FieldViolation};

/// Collects every rejected field of a payload before failing.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_error(self) -> EngineError {
        EngineError::SchemaViolation(self.0)
    }

    pub fn required<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "is required");
        }
        value
    }

    /// Any finite number
    pub fn finite(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        match value {
            Some(v) if !v.is_finite() => {
                self.push(field, "must be a finite number");
                None
            }
            other => other,
        }
    }

    /// Greater than 0 and no more than `max`
    pub fn positive_up_to(&mut self, field: &'static str, value: Option<f64>, max: f64) -> Option<f64> {
        match self.finite(field, value) {
            Some(v) if v <= 0.0 || v > max => {
                self.push(field, format!("must be greater than 0 and at most {max}"));
                None
            }
            other => other,
        }
    }

    pub fn in_range(
        &mut self,
        field: &'static str,
        value: Option<f64>,
        range: RangeInclusive<f64>,
    ) -> Option<f64> {
        match value {
            Some(v) if !range.contains(&v) => {
                self.push(
                    field,
                    format!("must be between {} and {}", range.start(), range.end()),
                );
                None
            }
            other => other,
        }
    }

    /// Whole number between 0 and 100
    pub fn percentage(&mut self, field: &'static str, value: Option<f64>) -> Option<u8> {
        let value = self.in_range(field, value, 0.0..=100.0)?;
        if value.fract() != 0.0 {
            self.push(field, "must be a whole number");
            return None;
        }
        Some(value as u8)
    }

    /// Position must sit on the increment grid
    pub fn aligned(
        &mut self,
        field: &'static str,
        value: Option<u8>,
        increment: Option<u8>,
    ) -> Option<u8> {
        match (value, increment) {
            (Some(v), Some(inc)) if v % inc != 0 => {
                self.push(field, format!("must be a multiple of increment {inc}"));
                None
            }
            (value, _) => value,
        }
    }
}
