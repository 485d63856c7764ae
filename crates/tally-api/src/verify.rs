use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, info};

use tally_crypto::token::verify_token;
use tally_types::api::{VerifyTokenRequest, VerifyTokenResponse};

use crate::error::ApiError;
use crate::state::VerifierState;

/// POST /verify: check a login token. Accepts a JSON or form body.
pub async fn verify(State(state): State<VerifierState>, req: Request) -> Response {
    let Some(token) = extract_token(req).await else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    match verify_token(&token, &state.login_secret) {
        Ok(claims) => {
            debug!("Token payload: {}", claims);
            info!("Token verified");

            let body = if state.dump_payload {
                VerifyTokenResponse::Payload {
                    token_payload: claims,
                }
            } else {
                VerifyTokenResponse::Verified { verified: true }
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => ApiError::Unprocessable(e.to_string()).into_response(),
    }
}

async fn extract_token(req: Request) -> Option<String> {
    let is_form = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    let body: VerifyTokenRequest = if is_form {
        <Form<VerifyTokenRequest> as FromRequest<()>>::from_request(req, &())
            .await
            .ok()
            .map(|Form(b)| b)?
    } else {
        <Json<VerifyTokenRequest> as FromRequest<()>>::from_request(req, &())
            .await
            .ok()
            .map(|Json(b)| b)?
    };

    body.token.filter(|t| !t.is_empty())
}
