use serde::{Deserialize, Serialize};

use super::errors::{FieldError, FieldErrors};
use super::fields::{email, required};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_type: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub description: String,
}

impl ContactForm {
    pub fn validate(self) -> Result<ContactRequest, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let name = errors.check(required("name", self.name.as_deref()));
        let email = errors.check(email("email", self.email.as_deref()));
        let subject = errors.check(required("subject", self.subject.as_deref()));
        let message = errors.check(required("message", self.message.as_deref()));

        match (name, email, subject, message) {
            (Some(name), Some(email), Some(subject), Some(message)) => Ok(ContactRequest {
                name,
                email,
                subject,
                message,
            }),
            _ => Err(errors.into_inner()),
        }
    }
}

impl QuoteForm {
    pub fn validate(self) -> Result<QuoteRequest, Vec<FieldError>> {
        let mut errors = FieldErrors::default();

        let name = errors.check(required("name", self.name.as_deref()));
        let email = errors.check(email("email", self.email.as_deref()));
        let phone = errors.check(required("phone", self.phone.as_deref()));
        let project_type = errors.check(required("projectType", self.project_type.as_deref()));
        let description = errors.check(required("description", self.description.as_deref()));

        match (name, email, phone, project_type, description) {
            (Some(name), Some(email), Some(phone), Some(project_type), Some(description)) => {
                Ok(QuoteRequest {
                    name,
                    email,
                    phone,
                    project_type,
                    description,
                })
            }
            _ => Err(errors.into_inner()),
        }
    }
}
