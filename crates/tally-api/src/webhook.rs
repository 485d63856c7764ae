use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use tracing::{debug, info, warn};

use tally_crypto::signature;
use tally_store::Store;
use tally_types::notification::{Notification, NotificationKind};

use crate::error::ApiError;
use crate::state::AppState;

/// Check the `Authorization` header against the raw body.
pub fn check_signature(headers: &HeaderMap, body: &[u8], secret: &str) -> Result<(), ApiError> {
    let supplied = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if signature::verify(body, secret, supplied) {
        Ok(())
    } else {
        Err(ApiError::InvalidSignature)
    }
}

/// POST /webhook: signed notification from the payment platform.
pub async fn handle_notification(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    debug!("Webhook received ({} bytes)", body.len());

    check_signature(&headers, &body, &state.secret_key)?;

    let notification = Notification::decode(&body)?;
    dispatch(&state.store, &notification)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Route a decoded notification to its handler.
pub fn dispatch(store: &Store, notification: &Notification) -> Result<(), ApiError> {
    info!("Notification received: {}", notification.kind);
    debug!(
        "Processing payload: {}",
        String::from_utf8_lossy(&notification.raw_body)
    );

    match notification.kind {
        NotificationKind::UserValidation => {
            let user_id = require_user(store, notification)?;
            info!("User {} validated", user_id);
        }
        NotificationKind::Payment => {
            let user_id = require_user(store, notification)?;
            let transaction_id = notification
                .transaction_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .ok_or_else(|| ApiError::InvalidParameter("Missing transaction id".into()))?;

            if store.record_purchase(transaction_id, user_id, notification.kind.as_str())? {
                info!("Purchase {} recorded for user {}", transaction_id, user_id);
            } else {
                match store.get_purchase(transaction_id)? {
                    Some(existing) if existing.user_id != user_id => warn!(
                        "Purchase {} already recorded for user {}, ignoring repeat for {}",
                        transaction_id, existing.user_id, user_id
                    ),
                    _ => info!("Purchase {} already recorded, ignoring repeat", transaction_id),
                }
            }
        }
        NotificationKind::Refund => {
            info!(
                "Refund for transaction {} acknowledged",
                notification.transaction_id.as_deref().unwrap_or("<none>")
            );
        }
    }

    Ok(())
}

fn require_user<'a>(store: &Store, notification: &'a Notification) -> Result<&'a str, ApiError> {
    let user_id = notification
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidParameter("Missing user id".into()))?;

    if !store.user_exists(user_id)? {
        return Err(ApiError::unknown_user(user_id));
    }
    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Notification {
        Notification::decode(body.as_bytes()).unwrap()
    }

    #[test]
    fn user_validation_known_and_unknown() {
        let store = Store::open_in_memory().unwrap();

        let ok = decode(r#"{"notification_type":"user_validation","user":{"id":"test_user_2"}}"#);
        assert!(dispatch(&store, &ok).is_ok());

        let missing = decode(r#"{"notification_type":"user_validation","user":{"id":"ghost"}}"#);
        let err = dispatch(&store, &missing).unwrap_err();
        assert_eq!(err.code(), "INVALID_USER");

        let no_user = decode(r#"{"notification_type":"user_validation"}"#);
        let err = dispatch(&store, &no_user).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
    }

    #[test]
    fn payment_records_purchase() {
        let store = Store::open_in_memory().unwrap();
        let payment = decode(
            r#"{"notification_type":"payment","user":{"id":"test_user_1"},"transaction":{"id":555}}"#,
        );

        dispatch(&store, &payment).unwrap();
        dispatch(&store, &payment).unwrap();

        let rows = store.take_purchases("test_user_1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_id, "555");
        assert_eq!(rows[0].notification_type, "payment");
    }

    #[test]
    fn repeat_payment_for_other_user_keeps_original() {
        let store = Store::open_in_memory().unwrap();
        let first = decode(
            r#"{"notification_type":"payment","user":{"id":"test_user_1"},"transaction":{"id":"t-1"}}"#,
        );
        let repeat = decode(
            r#"{"notification_type":"payment","user":{"id":"test_user_2"},"transaction":{"id":"t-1"}}"#,
        );

        dispatch(&store, &first).unwrap();
        dispatch(&store, &repeat).unwrap();

        let row = store.get_purchase("t-1").unwrap().unwrap();
        assert_eq!(row.user_id, "test_user_1");
        assert!(store.take_purchases("test_user_2").unwrap().is_empty());
    }

    #[test]
    fn payment_for_unknown_user_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let payment = decode(
            r#"{"notification_type":"payment","user":{"id":"ghost"},"transaction":{"id":"t-9"}}"#,
        );
        let err = dispatch(&store, &payment).unwrap_err();
        assert_eq!(err.code(), "INVALID_USER");
        assert!(store.get_purchase("t-9").unwrap().is_none());
    }

    #[test]
    fn payment_without_transaction_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let payment = decode(r#"{"notification_type":"payment","user":{"id":"test_user_1"}}"#);
        let err = dispatch(&store, &payment).unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
    }

    #[test]
    fn refund_is_a_no_op() {
        let store = Store::open_in_memory().unwrap();
        let refund = decode(
            r#"{"notification_type":"refund","user":{"id":"ghost"},"transaction":{"id":"9"}}"#,
        );
        dispatch(&store, &refund).unwrap();
        assert!(store.get_purchase("9").unwrap().is_none());
    }

    #[test]
    fn signature_header_is_checked() {
        let body = br#"{"notification_type":"refund"}"#;
        let mut headers = HeaderMap::new();
        assert!(check_signature(&headers, body, "s").is_err());

        headers.insert(
            header::AUTHORIZATION,
            signature::sign(body, "s").parse().unwrap(),
        );
        assert!(check_signature(&headers, body, "s").is_ok());
        assert!(check_signature(&headers, body, "t").is_err());
    }
}
