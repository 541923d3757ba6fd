//! The inventory facade: the single entry point for presentation layers.

use std::sync::Arc;

use stockroom_auth::{authorize, CredentialStore, Permission, Principal, Role, Session, UserRecord};
use stockroom_core::{Clock, DomainResult, ProductId, SystemClock};
use stockroom_products::{CatalogStore, NewProduct, Product, ProductPatch};

use crate::config::{InventoryConfig, ReadAccess};

/// Credentials, catalog and the current session behind one API.
///
/// Mutating catalog operations require an Admin session. Read operations are
/// open or login-gated depending on [`InventoryConfig::read_access`]. Every
/// failure is returned as a [`stockroom_core::DomainError`]; nothing here
/// prints or renders.
pub struct InventorySystem {
    config: InventoryConfig,
    credentials: CredentialStore,
    catalog: CatalogStore,
    session: Session,
    clock: Arc<dyn Clock>,
}

impl core::fmt::Debug for InventorySystem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventorySystem")
            .field("config", &self.config)
            .field("users", &self.credentials.len())
            .field("products", &self.catalog.len())
            .field("session", &self.session)
            .finish()
    }
}

impl InventorySystem {
    /// Default configuration on the wall clock.
    pub fn new() -> DomainResult<Self> {
        Self::with_config(InventoryConfig::default())
    }

    pub fn with_config(config: InventoryConfig) -> DomainResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build the system and run the bootstrap step (account seeding).
    pub fn with_clock(config: InventoryConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        let mut credentials = CredentialStore::new();
        if config.seed_default_accounts {
            credentials.seed_default_accounts(clock.now())?;
        }

        tracing::info!(
            users = credentials.len(),
            low_stock_threshold = config.low_stock_threshold,
            read_access = ?config.read_access,
            "inventory system initialized"
        );

        Ok(Self {
            config,
            credentials,
            catalog: CatalogStore::new(),
            session: Session::new(),
            clock,
        })
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn low_stock_threshold(&self) -> i64 {
        self.config.low_stock_threshold
    }

    /// Read-only view of registered accounts.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────

    /// Authenticate and replace the current identity.
    ///
    /// On `InvalidCredentials` the previous session is kept.
    pub fn login(&mut self, username: &str, password: &str) -> DomainResult<Principal> {
        match self.session.login(&self.credentials, username, password) {
            Ok(principal) => {
                tracing::info!(
                    user_id = %principal.user_id,
                    username = %principal.username,
                    role = %principal.role,
                    "login"
                );
                Ok(principal)
            }
            Err(err) => {
                tracing::debug!(username, "login rejected");
                Err(err)
            }
        }
    }

    /// Return to the anonymous state.
    pub fn logout(&mut self) -> Option<Principal> {
        let previous = self.session.logout();
        if let Some(principal) = &previous {
            tracing::info!(user_id = %principal.user_id, username = %principal.username, "logout");
        }
        previous
    }

    pub fn current_user(&self) -> Option<&Principal> {
        self.session.principal()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register a new account. Admin only.
    pub fn register_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<UserRecord> {
        let actor = authorize(&self.session, &Permission::USERS_MANAGE)?;
        let record = self
            .credentials
            .register(username, password, role, self.clock.now())?
            .clone();

        tracing::info!(
            actor = %actor.username,
            user_id = %record.user_id(),
            username = record.username(),
            role = %role,
            "user registered"
        );
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog mutations (Admin only)
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_product(&mut self, new: NewProduct) -> DomainResult<Product> {
        let actor = authorize(&self.session, &Permission::CATALOG_WRITE)?;
        let product = self.catalog.add(new, self.clock.now())?.clone();

        tracing::info!(actor = %actor.username, product_id = %product.id(), "product added");
        Ok(product)
    }

    pub fn update_product(&mut self, id: ProductId, patch: &ProductPatch) -> DomainResult<Product> {
        let actor = authorize(&self.session, &Permission::CATALOG_WRITE)?;
        let product = self.catalog.update(id, patch, self.clock.now())?.clone();

        tracing::info!(actor = %actor.username, product_id = %id, "product updated");
        Ok(product)
    }

    pub fn set_stock(&mut self, id: ProductId, stock_quantity: i64) -> DomainResult<Product> {
        let actor = authorize(&self.session, &Permission::CATALOG_WRITE)?;
        let product = self
            .catalog
            .set_stock(id, stock_quantity, self.clock.now())?
            .clone();

        tracing::info!(actor = %actor.username, product_id = %id, stock_quantity, "stock set");
        Ok(product)
    }

    pub fn delete_product(&mut self, id: ProductId) -> DomainResult<Product> {
        let actor = authorize(&self.session, &Permission::CATALOG_WRITE)?;
        let removed = self.catalog.delete(id)?;

        tracing::info!(actor = %actor.username, product_id = %id, "product deleted");
        Ok(removed)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog queries
    // ─────────────────────────────────────────────────────────────────────

    pub fn get_product(&self, id: ProductId) -> DomainResult<&Product> {
        self.ensure_can_read()?;
        self.catalog.get(id)
    }

    /// All products in id order.
    pub fn list_products(&self) -> DomainResult<Vec<&Product>> {
        self.ensure_can_read()?;
        Ok(self.catalog.list())
    }

    pub fn search_products(&self, term: &str) -> DomainResult<Vec<&Product>> {
        self.ensure_can_read()?;
        Ok(self.catalog.search(term))
    }

    /// Products at or below the configured threshold.
    pub fn low_stock_products(&self) -> DomainResult<Vec<&Product>> {
        self.low_stock_products_below(self.config.low_stock_threshold)
    }

    pub fn low_stock_products_below(&self, threshold: i64) -> DomainResult<Vec<&Product>> {
        self.ensure_can_read()?;
        Ok(self.catalog.low_stock(threshold))
    }

    fn ensure_can_read(&self) -> DomainResult<()> {
        match self.config.read_access {
            ReadAccess::Public => Ok(()),
            ReadAccess::Authenticated => {
                authorize(&self.session, &Permission::CATALOG_READ).map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockroom_core::DomainError;

    fn system() -> InventorySystem {
        InventorySystem::new().unwrap()
    }

    #[test]
    fn starts_anonymous_with_seeded_accounts() {
        let system = system();
        assert!(!system.is_authenticated());
        assert_eq!(system.credentials().usernames(), vec!["admin", "user"]);
    }

    #[test]
    fn seeding_can_be_disabled() {
        let config = InventoryConfig {
            seed_default_accounts: false,
            ..InventoryConfig::default()
        };
        let mut system = InventorySystem::with_config(config).unwrap();
        assert!(system.credentials().is_empty());
        assert_eq!(
            system.login("admin", "admin123").unwrap_err(),
            DomainError::InvalidCredentials
        );
    }

    #[test]
    fn only_admins_register_users() {
        let mut system = system();
        assert!(matches!(
            system.register_user("eve", "pw", Role::Admin),
            Err(DomainError::PermissionDenied(_))
        ));

        system.login("user", "user123").unwrap();
        assert!(matches!(
            system.register_user("eve", "pw", Role::Admin),
            Err(DomainError::PermissionDenied(_))
        ));

        system.login("admin", "admin123").unwrap();
        let record = system.register_user("eve", "pw", Role::User).unwrap();
        assert_eq!(record.username(), "eve");
        assert!(system.credentials().verify("eve", "pw"));

        assert_eq!(
            system.register_user("eve", "other", Role::User).unwrap_err(),
            DomainError::DuplicateUsername("eve".to_string())
        );
    }

    #[test]
    fn login_principal_carries_the_account_user_id() {
        let mut system = system();
        system.login("admin", "admin123").unwrap();
        let record = system.register_user("frank", "pw", Role::User).unwrap();

        let principal = system.login("frank", "pw").unwrap();
        assert_eq!(principal.user_id, record.user_id());
        assert_ne!(principal.user_id, system.credentials().get("admin").unwrap().user_id());
    }

    #[test]
    fn reads_can_require_login() {
        let config = InventoryConfig {
            read_access: ReadAccess::Authenticated,
            ..InventoryConfig::default()
        };
        let mut system = InventorySystem::with_config(config).unwrap();

        assert!(matches!(system.list_products(), Err(DomainError::PermissionDenied(_))));
        assert!(matches!(system.search_products("x"), Err(DomainError::PermissionDenied(_))));
        assert!(matches!(system.low_stock_products(), Err(DomainError::PermissionDenied(_))));

        system.login("user", "user123").unwrap();
        assert!(system.list_products().unwrap().is_empty());
    }

    #[test]
    fn public_reads_work_anonymously() {
        let mut system = system();
        system.login("admin", "admin123").unwrap();
        let added = system
            .add_product(NewProduct::new("Widget", "Tools", dec!(9.99), 3))
            .unwrap();
        system.logout();

        assert_eq!(system.get_product(added.id()).unwrap().name(), "Widget");
        assert_eq!(system.list_products().unwrap().len(), 1);
    }

    #[test]
    fn low_stock_uses_configured_threshold() {
        let config = InventoryConfig {
            low_stock_threshold: 1,
            ..InventoryConfig::default()
        };
        let mut system = InventorySystem::with_config(config).unwrap();
        system.login("admin", "admin123").unwrap();
        system.add_product(NewProduct::new("A", "x", dec!(1), 1)).unwrap();
        system.add_product(NewProduct::new("B", "x", dec!(1), 3)).unwrap();

        assert_eq!(system.low_stock_products().unwrap().len(), 1);
        assert_eq!(system.low_stock_products_below(5).unwrap().len(), 2);
    }
}
