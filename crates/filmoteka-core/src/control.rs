use thiserror::Error;

/// What a validator needs to know about a field's value
pub trait FieldValue {
    /// Nothing entered (absent, or only whitespace)
    fn is_blank(&self) -> bool;

    /// Numeric view for Min/Max; `None` for text and absent numbers
    fn as_number(&self) -> Option<i64>;
}

impl FieldValue for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn as_number(&self) -> Option<i64> {
        None
    }
}

impl FieldValue for Option<i32> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }

    fn as_number(&self) -> Option<i64> {
        self.map(i64::from)
    }
}

impl FieldValue for Option<u32> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }

    fn as_number(&self) -> Option<i64> {
        self.map(i64::from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Required,
    Min(i64),
    Max(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("is required")]
    Required,
    #[error("must be at least {min} (got {actual})")]
    Min { min: i64, actual: i64 },
    #[error("must be at most {max} (got {actual})")]
    Max { max: i64, actual: i64 },
}

impl Validator {
    /// Min and Max ignore absent values; pair them with Required when the field is mandatory.
    pub fn check<T: FieldValue>(&self, value: &T) -> Option<ValidationError> {
        match *self {
            Validator::Required => value.is_blank().then_some(ValidationError::Required),
            Validator::Min(min) => value
                .as_number()
                .filter(|actual| *actual < min)
                .map(|actual| ValidationError::Min { min, actual }),
            Validator::Max(max) => value
                .as_number()
                .filter(|actual| *actual > max)
                .map(|actual| ValidationError::Max { max, actual }),
        }
    }
}

/// A single editable value with its validators.
///
/// `set_value` is a user edit and marks the control dirty; `patch_value` is
/// used when loading data and leaves the dirty flag alone.
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl<T> {
    value: T,
    validators: Vec<Validator>,
    dirty: bool,
}

impl<T: FieldValue> FormControl<T> {
    pub fn new(value: T) -> Self {
        Self::with_validators(value, Vec::new())
    }

    pub fn with_validators(value: T, validators: Vec<Validator>) -> Self {
        Self {
            value,
            validators,
            dirty: false,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    pub fn patch_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_pristine(&mut self) {
        self.dirty = false;
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.check(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.check(&self.value).is_none())
    }
}
