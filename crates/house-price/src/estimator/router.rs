use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::json;
use tracing::debug;

use super::domain::{FormFields, RawInput};
use super::form::{FormOutcome, FormPage};
use super::service::{EstimateError, PriceEstimator, INFERENCE_HINT};

/// Router serving the estimate form and its JSON counterpart.
pub fn estimator_router(estimator: Arc<PriceEstimator>) -> Router {
    Router::new()
        .route("/", get(form_handler))
        .route("/predict", post(predict_form_handler))
        .route("/api/v1/estimate", post(estimate_handler))
        .route("/api/v1/model", get(model_handler))
        .with_state(estimator)
}

fn html_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.as_ref())],
        body,
    )
        .into_response()
}

pub(crate) async fn form_handler(State(estimator): State<Arc<PriceEstimator>>) -> Response {
    let status = estimator.model_status();
    let input = RawInput::default();
    let code = if status.loaded {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    html_response(code, FormPage::new(&status, &input).render())
}

pub(crate) async fn predict_form_handler(
    State(estimator): State<Arc<PriceEstimator>>,
    submission: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let status = estimator.model_status();
    if !status.loaded {
        let input = RawInput::default();
        return html_response(
            StatusCode::SERVICE_UNAVAILABLE,
            FormPage::new(&status, &input).render(),
        );
    }

    // Fields are decoded one by one so a bad entry does not wipe the others.
    let pairs = match submission {
        Ok(Form(pairs)) => pairs,
        Err(rejection) => {
            debug!(error = %rejection, "form submission rejected");
            let input = RawInput::default();
            let page = FormPage::new(&status, &input)
                .with_outcome(FormOutcome::Rejected(rejection.body_text()));
            return html_response(StatusCode::UNPROCESSABLE_ENTITY, page.render());
        }
    };

    let fields = pairs
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()));
    let input = match FormFields::decode(fields).into_result() {
        Ok(input) => input,
        Err((input, error)) => {
            debug!(error = %error, "form field rejected");
            let page = FormPage::new(&status, &input)
                .with_outcome(FormOutcome::Rejected(error.to_string()));
            return html_response(StatusCode::UNPROCESSABLE_ENTITY, page.render());
        }
    };

    if let Err(error) = input.validate() {
        let page =
            FormPage::new(&status, &input).with_outcome(FormOutcome::Rejected(error.to_string()));
        return html_response(StatusCode::UNPROCESSABLE_ENTITY, page.render());
    }

    match estimator.estimate(&input) {
        Ok(estimate) => {
            let page = FormPage::new(&status, &input).with_outcome(FormOutcome::Estimate(&estimate));
            html_response(StatusCode::OK, page.render())
        }
        Err(error) => {
            let code = error_status(&error);
            let page = FormPage::new(&status, &input).with_outcome(FormOutcome::Failed(&error));
            html_response(code, page.render())
        }
    }
}

pub(crate) async fn estimate_handler(
    State(estimator): State<Arc<PriceEstimator>>,
    payload: Result<Json<RawInput>, JsonRejection>,
) -> Response {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    if let Err(error) = input.validate() {
        let payload = json!({ "error": error.to_string() });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    match estimator.estimate(&input) {
        Ok(estimate) => (StatusCode::OK, Json(estimate.view())).into_response(),
        Err(error @ EstimateError::Inference(_)) => {
            let payload = json!({
                "error": error.to_string(),
                "hint": INFERENCE_HINT,
            });
            (error_status(&error), Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (error_status(&error), Json(payload)).into_response()
        }
    }
}

pub(crate) async fn model_handler(State(estimator): State<Arc<PriceEstimator>>) -> Response {
    (StatusCode::OK, Json(estimator.model_status())).into_response()
}

fn error_status(error: &EstimateError) -> StatusCode {
    match error {
        EstimateError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        EstimateError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
