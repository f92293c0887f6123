//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DashboardQuery, PaymentCommand, RegistrationCommand, SessionService};

use super::token_config::WebhookKey;

/// Parameter object bundling the driving ports used by HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationCommand>,
    pub sessions: Arc<dyn SessionService>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub payments: Arc<dyn PaymentCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationCommand>,
    pub sessions: Arc<dyn SessionService>,
    pub dashboard: Arc<dyn DashboardQuery>,
    pub payments: Arc<dyn PaymentCommand>,
    /// Shared key for the payment webhook. `None` disables the endpoint.
    pub webhook_key: Option<WebhookKey>,
}

impl HttpState {
    /// Construct state from a ports bundle and the optional webhook key.
    pub fn new(ports: HttpStatePorts, webhook_key: Option<WebhookKey>) -> Self {
        let HttpStatePorts {
            registration,
            sessions,
            dashboard,
            payments,
        } = ports;
        Self {
            registration,
            sessions,
            dashboard,
            payments,
            webhook_key,
        }
    }
}
