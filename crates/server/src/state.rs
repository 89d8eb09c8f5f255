//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::MandapConfig;
use crate::services::auth::{IdentityBackend, IdentityProvider};
use crate::services::authz::AuthorizationEngine;
use crate::services::catalog::ProductCatalog;
use crate::services::orders::OrderWorkflow;
use crate::services::roles::RoleResolver;
use crate::store::{
    DocumentStore, OrderRepository, ProductRepository, ProfileRepository,
};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; wires the document store into the
/// repositories and services once at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MandapConfig,
    identity: IdentityProvider,
    roles: RoleResolver,
    authz: Arc<AuthorizationEngine>,
    catalog: ProductCatalog,
    orders: OrderWorkflow,
}

impl AppState {
    /// Create a new application state over a document store and a
    /// credential backend.
    #[must_use]
    pub fn new(
        config: MandapConfig,
        store: Arc<dyn DocumentStore>,
        backend: Arc<dyn IdentityBackend>,
    ) -> Self {
        let profiles = ProfileRepository::new(store.clone());
        let roles = RoleResolver::new(profiles.clone());
        let authz = Arc::new(AuthorizationEngine::new(roles.clone()));
        let identity = IdentityProvider::new(backend, profiles);
        let catalog = ProductCatalog::new(ProductRepository::new(store.clone()));
        let orders = OrderWorkflow::new(OrderRepository::new(store));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                identity,
                roles,
                authz,
                catalog,
                orders,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &MandapConfig {
        &self.inner.config
    }

    /// Get a reference to the identity provider.
    #[must_use]
    pub fn identity(&self) -> &IdentityProvider {
        &self.inner.identity
    }

    /// Get a reference to the role resolver.
    #[must_use]
    pub fn roles(&self) -> &RoleResolver {
        &self.inner.roles
    }

    /// Get the shared authorization engine.
    #[must_use]
    pub fn authz(&self) -> Arc<AuthorizationEngine> {
        self.inner.authz.clone()
    }

    /// Get a reference to the cached product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the order workflow.
    #[must_use]
    pub fn orders(&self) -> &OrderWorkflow {
        &self.inner.orders
    }
}
