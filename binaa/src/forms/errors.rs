use serde::Serialize;

use crate::i18n::Locale;

/// Why a submitted field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldReason {
    Required,
    InvalidEmail,
    TooShort { min: usize },
    InvalidFormat,
    InvalidDate,
    InvalidRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: FieldReason,
}

impl FieldError {
    pub fn new(field: &'static str, reason: FieldReason) -> Self {
        Self { field, reason }
    }

    pub fn text(&self, locale: Locale) -> String {
        match (locale, self.reason) {
            (Locale::Ar, FieldReason::Required) => "هذا الحقل مطلوب".to_string(),
            (Locale::Ar, FieldReason::InvalidEmail) => "البريد الإلكتروني غير صالح".to_string(),
            (Locale::Ar, FieldReason::TooShort { min }) => {
                format!("يجب أن يكون {min} أحرف على الأقل")
            }
            (Locale::Ar, FieldReason::InvalidFormat) => "صيغة البيانات غير صالحة".to_string(),
            (Locale::Ar, FieldReason::InvalidDate) => "التاريخ غير صالح".to_string(),
            (Locale::Ar, FieldReason::InvalidRole) => "الدور غير صالح".to_string(),
            (Locale::En, FieldReason::Required) => "This field is required".to_string(),
            (Locale::En, FieldReason::InvalidEmail) => "Invalid email address".to_string(),
            (Locale::En, FieldReason::TooShort { min }) => {
                format!("Must be at least {min} characters")
            }
            (Locale::En, FieldReason::InvalidFormat) => "Malformed value".to_string(),
            (Locale::En, FieldReason::InvalidDate) => "Invalid date".to_string(),
            (Locale::En, FieldReason::InvalidRole) => "Invalid role".to_string(),
        }
    }
}

/// Accumulates field errors so a form reports every problem at once
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    pub(crate) fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}
