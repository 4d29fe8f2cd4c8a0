use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::IntoResponse,
};
use hyper::StatusCode;
use tracing::{debug, error, info};
use validator::Validate;

use crate::{
    AppState,
    models::email::{MessageKey, SubscribeResponse, Subscriber},
    routes::LangQuery,
    store::AddOutcome,
};

fn reply(status: StatusCode, message_key: MessageKey) -> (StatusCode, Json<SubscribeResponse>) {
    (status, Json(SubscribeResponse { message_key }))
}

pub async fn subscribe(
    State(state): State<AppState>,
    query: Result<Query<LangQuery>, QueryRejection>,
    body: Result<Json<Subscriber>, JsonRejection>,
) -> impl IntoResponse {
    let query = LangQuery::or_default(query);
    let (lang, _) = state.locales.for_tag(query.lang.as_deref());

    let subscriber = match body {
        Ok(Json(subscriber)) if subscriber.validate().is_ok() => subscriber,
        Ok(_) => {
            debug!(lang = lang.code(), "rejected malformed email");
            return reply(StatusCode::BAD_REQUEST, MessageKey::EmailInvalid);
        }
        Err(rejection) => {
            debug!(lang = lang.code(), error = %rejection, "rejected subscribe body");
            return reply(StatusCode::BAD_REQUEST, MessageKey::EmailInvalid);
        }
    };

    match state.store.add_if_absent(&subscriber.email).await {
        Ok(AddOutcome::Added) => reply(StatusCode::CREATED, MessageKey::EmailSuccess),
        Ok(AddOutcome::AlreadyExists) => {
            info!(lang = lang.code(), "duplicate subscription");
            reply(StatusCode::CONFLICT, MessageKey::EmailExists)
        }
        Err(e) => {
            error!(error = %e, "error recording subscriber");
            reply(StatusCode::INTERNAL_SERVER_ERROR, MessageKey::EmailError)
        }
    }
}
