//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::domain::ports::{
    MockDashboardQuery, MockPaymentCommand, MockRegistrationCommand, MockSessionService,
};

use super::configure_api;
use super::state::{HttpState, HttpStatePorts};
use super::token_config::WebhookKey;

/// Mocked driving ports; fields left at their defaults reject every call.
pub struct MockPorts {
    pub registration: MockRegistrationCommand,
    pub sessions: MockSessionService,
    pub dashboard: MockDashboardQuery,
    pub payments: MockPaymentCommand,
    pub webhook_key: Option<WebhookKey>,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            registration: MockRegistrationCommand::new(),
            sessions: MockSessionService::new(),
            dashboard: MockDashboardQuery::new(),
            payments: MockPaymentCommand::new(),
            webhook_key: None,
        }
    }
}

impl MockPorts {
    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            HttpStatePorts {
                registration: Arc::new(self.registration),
                sessions: Arc::new(self.sessions),
                dashboard: Arc::new(self.dashboard),
                payments: Arc::new(self.payments),
            },
            self.webhook_key,
        ))
    }
}

/// Build an app serving the `/api` scope against `state`.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(web::scope("/api").configure(configure_api))
}

/// Send `request` and decode the JSON body. Empty bodies decode as `null`.
pub async fn call_json<S, B>(app: &S, request: actix_test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}
