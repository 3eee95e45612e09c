//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::UserStore;
use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(users_query: Arc<dyn UsersQuery>, users_command: Arc<dyn UsersCommand>) -> Self {
        Self {
            users_query,
            users_command,
        }
    }

    /// Serve both ports from one store so reads observe every write.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use user_registry::domain::UserStore;
    /// use user_registry::inbound::http::state::HttpState;
    /// use user_registry::outbound::memory::InMemoryUserRepository;
    ///
    /// let store = UserStore::new(Arc::new(InMemoryUserRepository::new()));
    /// let _state = HttpState::from_store(store);
    /// ```
    pub fn from_store<R>(store: UserStore<R>) -> Self
    where
        R: UserRepository + 'static,
    {
        let store = Arc::new(store);
        Self::new(store.clone(), store)
    }
}
