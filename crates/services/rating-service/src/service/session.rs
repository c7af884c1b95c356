//! Role-specific sessions.
//!
//! A [`Session`] is resolved once from the logged-in user's role. Each variant
//! exposes only what that role can do and reads or writes through the
//! [`DomainStore`] it is handed.

use rust_decimal::Decimal;

use domain::{
    DomainError, DomainResult, NewUser, Rating, Store, StoreFilter, User, UserRole,
    NO_RATING_LABEL, UNKNOWN_RATER_NAME,
};

use super::domain_store::{DomainStore, StoreStats};

/// Render an overall rating with one decimal place, or "N/A".
pub fn format_rating(rating: Option<Decimal>) -> String {
    match rating {
        Some(value) => format!("{:.1}", value),
        None => NO_RATING_LABEL.to_string(),
    }
}

/// A logged-in user, dispatched by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Administrator(AdminSession),
    NormalUser(ShopperSession),
    StoreOwner(OwnerSession),
}

impl Session {
    /// Authenticate and resolve the session for the matching user.
    pub fn login(
        store: &DomainStore,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<Self> {
        store
            .authenticate(email, password, role)
            .map(Self::start)
            .ok_or(DomainError::InvalidCredentials)
    }

    pub fn start(user: &User) -> Self {
        match user.role {
            UserRole::Administrator => Session::Administrator(AdminSession { admin_id: user.id }),
            UserRole::NormalUser => Session::NormalUser(ShopperSession { user_id: user.id }),
            UserRole::StoreOwner => Session::StoreOwner(OwnerSession { owner_id: user.id }),
        }
    }

    pub fn user_id(&self) -> u64 {
        match self {
            Session::Administrator(s) => s.admin_id,
            Session::NormalUser(s) => s.user_id,
            Session::StoreOwner(s) => s.owner_id,
        }
    }

    pub fn role(&self) -> UserRole {
        match self {
            Session::Administrator(_) => UserRole::Administrator,
            Session::NormalUser(_) => UserRole::NormalUser,
            Session::StoreOwner(_) => UserRole::StoreOwner,
        }
    }

    /// Any role may change its own password.
    pub fn change_password(
        &self,
        store: &mut DomainStore,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        store.change_password(self.user_id(), current_password, new_password)
    }
}

// =============================================================================
// Administrator
// =============================================================================

/// Store row on the administrator dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    pub store: Store,
    pub overall_rating: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    admin_id: u64,
}

impl AdminSession {
    pub fn admin_id(&self) -> u64 {
        self.admin_id
    }

    pub fn stats(&self, store: &DomainStore) -> StoreStats {
        store.stats()
    }

    pub fn add_user(&self, store: &mut DomainStore, candidate: NewUser) -> DomainResult<User> {
        store.add_user(candidate)
    }

    pub fn remove_user(&self, store: &mut DomainStore, user_id: u64) -> DomainResult<()> {
        store.remove_user(user_id, self.admin_id)
    }

    pub fn remove_store(&self, store: &mut DomainStore, store_id: u64) -> DomainResult<()> {
        store.remove_store(store_id)
    }

    pub fn store_rows(&self, store: &DomainStore) -> Vec<StoreRow> {
        store
            .stores()
            .iter()
            .map(|s| StoreRow {
                store: s.clone(),
                overall_rating: store.overall_rating(s.id),
            })
            .collect()
    }
}

// =============================================================================
// Normal user
// =============================================================================

/// A discoverable store with the shopper's own rating
#[derive(Debug, Clone, PartialEq)]
pub struct StoreListing {
    pub store: Store,
    pub overall_rating: Option<Decimal>,
    pub my_rating: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopperSession {
    user_id: u64,
}

impl ShopperSession {
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Search claimed stores by name or address.
    pub fn browse(&self, store: &DomainStore, query: &str) -> Vec<StoreListing> {
        store
            .list_stores(&StoreFilter::new(query))
            .into_iter()
            .map(|s| StoreListing {
                store: s.clone(),
                overall_rating: store.overall_rating(s.id),
                my_rating: store.user_rating(self.user_id, s.id).map(|r| r.rating),
            })
            .collect()
    }

    /// Submit or modify this user's rating of a store.
    pub fn rate(&self, store: &mut DomainStore, store_id: u64, value: u8) -> DomainResult<Rating> {
        store.upsert_rating(self.user_id, store_id, value)
    }
}

// =============================================================================
// Store owner
// =============================================================================

/// One rating received by the owner's store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub rater_name: String,
    pub rater_email: Option<String>,
    pub rating: u8,
}

/// Everything the owner sees about their store
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerDashboard {
    pub store: Store,
    pub overall_rating: Option<Decimal>,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerSession {
    owner_id: u64,
}

impl OwnerSession {
    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }

    pub fn my_store<'a>(&self, store: &'a DomainStore) -> Option<&'a Store> {
        store.store_owned_by(self.owner_id)
    }

    pub fn open_store(
        &self,
        store: &mut DomainStore,
        name: &str,
        address: &str,
    ) -> DomainResult<Store> {
        store.add_store(self.owner_id, name, address)
    }

    pub fn rename_store(&self, store: &mut DomainStore, new_name: &str) -> DomainResult<()> {
        let store_id = self
            .my_store(store)
            .map(|s| s.id)
            .ok_or_else(|| DomainError::not_found("Store"))?;
        store.rename_store(store_id, new_name)
    }

    /// `None` until the owner has opened a store.
    pub fn dashboard(&self, store: &DomainStore) -> Option<OwnerDashboard> {
        let own = self.my_store(store)?;

        let reviews = store
            .ratings_for_store(own.id)
            .into_iter()
            .map(|r| {
                let rater = store.find_user(r.user_id);
                Review {
                    rater_name: rater
                        .map(|u| u.name.clone())
                        .unwrap_or_else(|| UNKNOWN_RATER_NAME.to_string()),
                    rater_email: rater.map(|u| u.email.clone()),
                    rating: r.rating,
                }
            })
            .collect();

        Some(OwnerDashboard {
            store: own.clone(),
            overall_rating: store.overall_rating(own.id),
            reviews,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(store: &mut DomainStore, name: &str, email: &str, role: UserRole) -> User {
        store
            .add_user(NewUser::new(name, email, "1 Road", role, "Abc@1234"))
            .unwrap()
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "N/A");
        assert_eq!(format_rating(Some(Decimal::from(5))), "5.0");
        assert_eq!(format_rating(Some(Decimal::new(43, 1))), "4.3");
    }

    #[test]
    fn test_login_resolves_role() {
        let mut store = DomainStore::in_memory();
        let olive = signup(&mut store, "Olive", "olive@x.com", UserRole::StoreOwner);

        let session = Session::login(&store, "OLIVE@x.com", "Abc@1234", UserRole::StoreOwner).unwrap();
        assert_eq!(session.role(), UserRole::StoreOwner);
        assert_eq!(session.user_id(), olive.id);
        assert!(matches!(session, Session::StoreOwner(_)));
    }

    #[test]
    fn test_login_with_wrong_role_fails() {
        let mut store = DomainStore::in_memory();
        signup(&mut store, "Olive", "olive@x.com", UserRole::StoreOwner);

        let result = Session::login(&store, "olive@x.com", "Abc@1234", UserRole::NormalUser);
        assert_eq!(result, Err(DomainError::InvalidCredentials));
    }

    #[test]
    fn test_admin_cannot_remove_itself() {
        let mut store = DomainStore::in_memory();
        let session = Session::start(&User::seed_admin());
        let Session::Administrator(admin) = session else {
            panic!("expected administrator session");
        };

        assert_eq!(
            admin.remove_user(&mut store, admin.admin_id()),
            Err(DomainError::Forbidden)
        );
    }

    #[test]
    fn test_shopper_browse_and_rate() {
        let mut store = DomainStore::in_memory();
        let olive = signup(&mut store, "Olive", "olive@x.com", UserRole::StoreOwner);
        let jane = signup(&mut store, "Jane Doe", "jane@x.com", UserRole::NormalUser);
        let cafe = store.add_store(olive.id, "Cafe", "1 Main St").unwrap();

        let shopper = ShopperSession { user_id: jane.id };
        let before = shopper.browse(&store, "cafe");
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].my_rating, None);
        assert_eq!(before[0].overall_rating, None);

        shopper.rate(&mut store, cafe.id, 4).unwrap();

        let after = shopper.browse(&store, "");
        assert_eq!(after[0].my_rating, Some(4));
        assert_eq!(after[0].overall_rating, Some(Decimal::from(4)));
        assert!(shopper.browse(&store, "bakery").is_empty());
    }

    #[test]
    fn test_owner_dashboard() {
        let mut store = DomainStore::in_memory();
        let olive = signup(&mut store, "Olive", "olive@x.com", UserRole::StoreOwner);
        let jane = signup(&mut store, "Jane Doe", "jane@x.com", UserRole::NormalUser);
        let bob = signup(&mut store, "Bob Smith", "bob@x.com", UserRole::NormalUser);
        let owner = OwnerSession { owner_id: olive.id };

        assert!(owner.dashboard(&store).is_none());
        assert!(matches!(
            owner.rename_store(&mut store, "Nope"),
            Err(DomainError::NotFound(_))
        ));

        let cafe = owner.open_store(&mut store, "Cafe", "1 Main St").unwrap();
        store.upsert_rating(jane.id, cafe.id, 5).unwrap();
        store.upsert_rating(bob.id, cafe.id, 2).unwrap();
        store.remove_user(bob.id, 1).unwrap();
        owner.rename_store(&mut store, "Corner Cafe").unwrap();

        let dashboard = owner.dashboard(&store).unwrap();
        assert_eq!(dashboard.store.name, "Corner Cafe");
        assert_eq!(dashboard.overall_rating, Some(Decimal::new(35, 1)));
        assert_eq!(
            dashboard.reviews,
            vec![
                Review {
                    rater_name: "Jane Doe".to_string(),
                    rater_email: Some("jane@x.com".to_string()),
                    rating: 5,
                },
                Review {
                    rater_name: "Unknown User".to_string(),
                    rater_email: None,
                    rating: 2,
                },
            ]
        );
    }

    #[test]
    fn test_admin_store_rows() {
        let mut store = DomainStore::in_memory();
        let olive = signup(&mut store, "Olive", "olive@x.com", UserRole::StoreOwner);
        let jane = signup(&mut store, "Jane Doe", "jane@x.com", UserRole::NormalUser);
        let cafe = store.add_store(olive.id, "Cafe", "1 Main St").unwrap();
        store.upsert_rating(jane.id, cafe.id, 3).unwrap();

        let admin = AdminSession { admin_id: 1 };
        let rows = admin.store_rows(&store);

        assert_eq!(rows.len(), 1);
        assert_eq!(format_rating(rows[0].overall_rating), "3.0");
        assert_eq!(admin.stats(&store).total_ratings, 1);
    }
}
