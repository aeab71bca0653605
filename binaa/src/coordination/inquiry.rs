use crate::forms::{ContactForm, QuoteForm};
use crate::i18n::Message;

use super::errors::CoordinationError;

/// Accepts a contact-page message. Requests are recorded in the logs only.
pub fn submit_contact(form: ContactForm) -> Result<Message, CoordinationError> {
    let request = form.validate()?;
    tracing::info!(
        name = %request.name,
        email = %request.email,
        subject = %request.subject,
        message = %request.message,
        "Contact form submitted"
    );
    Ok(Message::ContactReceived)
}

pub fn submit_quote(form: QuoteForm) -> Result<Message, CoordinationError> {
    let request = form.validate()?;
    tracing::info!(
        name = %request.name,
        email = %request.email,
        phone = %request.phone,
        project_type = %request.project_type,
        description = %request.description,
        "Quote request submitted"
    );
    Ok(Message::QuoteReceived)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_contact() {
        let form = ContactForm {
            name: Some("Huda".to_string()),
            email: Some("huda@example.com".to_string()),
            subject: Some("Renovation".to_string()),
            message: Some("Please call me".to_string()),
        };
        assert_eq!(submit_contact(form).unwrap(), Message::ContactReceived);
    }

    #[test]
    fn test_submit_quote_rejects_bad_email() {
        let form = QuoteForm {
            name: Some("Huda".to_string()),
            email: Some("huda".to_string()),
            phone: Some("0500000000".to_string()),
            project_type: Some("villa".to_string()),
            description: Some("Two floors".to_string()),
        };
        assert!(matches!(
            submit_quote(form),
            Err(CoordinationError::Validation(fields)) if fields.len() == 1
        ));
    }
}
