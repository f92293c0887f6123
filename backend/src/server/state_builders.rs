//! Builders wiring repositories and security adapters into HTTP state.

use std::sync::Arc;

use actix_web::web;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use tracing::info;

use school_portal::domain::ports::{SchoolRepository, StudentRepository};
use school_portal::domain::{
    DashboardService, PaymentService, RegistrationService, SchoolSessionService,
};
use school_portal::inbound::http::state::{HttpState, HttpStatePorts};
use school_portal::outbound::memory::{InMemorySchoolRepository, InMemoryStudentRepository};
use school_portal::outbound::persistence::{DieselSchoolRepository, DieselStudentRepository};
use school_portal::outbound::security::{Argon2PasswordHasher, HmacSessionTokenCodec};

use super::ServerConfig;

/// Settings shared by every service regardless of the store behind them.
struct ServiceSettings<'a> {
    codec: Arc<HmacSessionTokenCodec>,
    token_ttl: Duration,
    support_contact: &'a str,
}

fn build_ports<S, T>(schools: Arc<S>, students: Arc<T>, settings: ServiceSettings<'_>) -> HttpStatePorts
where
    S: SchoolRepository + 'static,
    T: StudentRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let hasher = Arc::new(Argon2PasswordHasher::new());

    HttpStatePorts {
        registration: Arc::new(RegistrationService::new(
            schools.clone(),
            students.clone(),
            hasher.clone(),
            clock.clone(),
            settings.support_contact,
        )),
        sessions: Arc::new(SchoolSessionService::new(
            schools,
            hasher,
            settings.codec,
            clock,
            settings.token_ttl,
        )),
        dashboard: Arc::new(DashboardService::new(students.clone())),
        payments: Arc::new(PaymentService::new(students)),
    }
}

/// Build HTTP state, choosing Diesel repositories when a pool is configured
/// and the in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let settings = ServiceSettings {
        codec: Arc::new(HmacSessionTokenCodec::new(
            config.secrets.token_secret.clone(),
        )),
        token_ttl: config.token_ttl,
        support_contact: &config.support_contact,
    };

    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            build_ports(
                Arc::new(DieselSchoolRepository::new(pool.clone())),
                Arc::new(DieselStudentRepository::new(pool.clone())),
                settings,
            )
        }
        None => {
            info!("no database configured; using in-memory repositories");
            build_ports(
                Arc::new(InMemorySchoolRepository::new()),
                Arc::new(InMemoryStudentRepository::new()),
                settings,
            )
        }
    };

    web::Data::new(HttpState::new(ports, config.secrets.webhook_key.clone()))
}
