//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    EventCommand, EventQuery, EventReportQuery, EventRepository, TokenRepository, UserAccounts,
    UserRepository,
};
use crate::domain::{EventReportService, EventService, UserAccountsService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn UserAccounts>,
    pub events: Arc<dyn EventCommand>,
    pub event_queries: Arc<dyn EventQuery>,
    pub reports: Arc<dyn EventReportQuery>,
}

impl HttpState {
    /// Wire the domain services over a set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use calendar_backend::inbound::http::state::HttpState;
    /// use calendar_backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     store.clone(),
    ///     store.clone(),
    ///     store,
    ///     Arc::new(DefaultClock),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn from_repositories<U, T, E>(
        users: Arc<U>,
        tokens: Arc<T>,
        events: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        T: TokenRepository + 'static,
        E: EventRepository + 'static,
    {
        let event_service = Arc::new(EventService::new(events.clone()));
        Self {
            accounts: Arc::new(UserAccountsService::new(users, tokens)),
            events: event_service.clone(),
            event_queries: event_service,
            reports: Arc::new(EventReportService::new(events, clock)),
        }
    }
}
