use axum::{Form, Json, Router, routing::post};
use binaa::{ContactForm, QuoteForm};

use super::error::{ApiError, IntoResponseError, MessageResponse};
use super::locale::ApiLocale;

pub(crate) fn router() -> Router<()> {
    Router::new()
        .route("/contact", post(contact))
        .route("/quote", post(quote))
}

async fn contact(
    ApiLocale(locale): ApiLocale,
    Form(form): Form<ContactForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = binaa::submit_contact(form).into_response_error(locale)?;
    Ok(Json(MessageResponse::new(message, locale)))
}

async fn quote(
    ApiLocale(locale): ApiLocale,
    Form(form): Form<QuoteForm>,
) -> Result<Json<MessageResponse>, ApiError> {
    let message = binaa::submit_quote(form).into_response_error(locale)?;
    Ok(Json(MessageResponse::new(message, locale)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::read_json;
    use axum::body::Body;
    use binaa::{Locale, Message};
    use http::{Request, StatusCode};
    use tower::ServiceExt;

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_contact_accepts_complete_form() {
        let response = router()
            .oneshot(post_form(
                "/contact?lang=en",
                "name=Huda&email=huda%40example.com&subject=Visit&message=Hello",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["message"], Message::ContactReceived.text(Locale::En));
    }

    #[tokio::test]
    async fn test_quote_reports_each_missing_field() {
        let response = router()
            .oneshot(post_form("/quote?lang=ar", "name=Omar&email=omar%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        let fields: Vec<_> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(fields, ["phone", "projectType", "description"]);
    }
}
