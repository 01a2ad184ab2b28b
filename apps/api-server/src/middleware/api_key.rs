//! API-key extractor guarding write endpoints.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Header carrying the admin API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Proof that the request carried the configured admin API key.
///
/// Put it before the body extractor so rejected requests never have their body read:
/// ```ignore
/// async fn create(_admin: AdminAccess, body: web::Json<CreatePostRequest>) -> impl Responder
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl FromRequest for AdminAccess {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let provided = req.headers().get(API_KEY_HEADER).map(|v| v.as_bytes());

        match state.admin_key.verify(provided) {
            Ok(()) => ready(Ok(AdminAccess)),
            Err(e) => {
                tracing::warn!(key_present = provided.is_some(), "Rejected API key");
                ready(Err(e.into()))
            }
        }
    }
}
