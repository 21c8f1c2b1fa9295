use std::str::FromStr;

use crate::error::{Error, Expected, Result};
use crate::section::Section;

/// Read-only, typed access to a snapshot of one section.
///
/// The view owns a copy of the section, so later changes to the document are not visible
/// through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    section: Section,
}

impl SectionView {
    #[must_use]
    pub(crate) fn new(section: Section) -> Self {
        Self { section }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.section.name()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.section.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.section.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.section.entries().map(|(k, _)| k)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.raw(key).map(str::to_owned)
    }

    /// Lenient boolean: true iff the first character, lower-cased, is `y`, `1` or `t`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let raw = self.raw(key)?;
        Ok(raw
            .chars()
            .next()
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'y' | '1' | 't')))
    }

    pub fn get_int(&self, key: &str) -> Result<i32> {
        let raw = self.raw(key)?;
        raw.parse().map_err(|_| mismatch(key, Expected::Int))
    }

    pub fn get_float(&self, key: &str) -> Result<f32> {
        parse_decimal(self.raw(key)?).ok_or_else(|| mismatch(key, Expected::Float))
    }

    pub fn get_double(&self, key: &str) -> Result<f64> {
        parse_decimal(self.raw(key)?).ok_or_else(|| mismatch(key, Expected::Double))
    }

    /// Validates `key` and returns its non-empty raw text.
    fn raw(&self, key: &str) -> Result<&str> {
        match self.section.get(key) {
            None => Err(Error::NameMissing {
                key: key.to_owned(),
                section: self.section.name().to_owned(),
            }),
            Some("") => Err(Error::ValueMissing {
                key: key.to_owned(),
            }),
            Some(raw) => Ok(raw),
        }
    }
}

fn mismatch(key: &str, expected: Expected) -> Error {
    Error::TypeMismatch {
        key: key.to_owned(),
        expected,
    }
}

trait Decimal: FromStr + Copy {
    fn is_finite(self) -> bool;
    fn is_zero(self) -> bool;
}

impl Decimal for f32 {
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }
}

impl Decimal for f64 {
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn is_zero(self) -> bool {
        self == 0.0
    }
}

// `inf`, `NaN`, literals that overflow to infinity and non-zero literals that underflow to zero
// are out of range for the target type.
fn parse_decimal<T: Decimal>(raw: &str) -> Option<T> {
    let value = raw.parse::<T>().ok()?;

    if !value.is_finite() || (value.is_zero() && !denotes_zero(raw)) {
        return None;
    }

    Some(value)
}

fn denotes_zero(raw: &str) -> bool {
    let mantissa = raw.split(['e', 'E']).next().unwrap_or(raw);
    !mantissa.chars().any(|c| matches!(c, '1'..='9'))
}
