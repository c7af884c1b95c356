//! Domain store - single owner of the users, stores and ratings collections.
//!
//! Every read and write goes through this type so the uniqueness and
//! referential rules hold after each operation. After a successful mutation the
//! touched collection is mirrored through the [`PersistenceGateway`].

use std::collections::HashSet;
use std::hash::Hash;

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{error, info, warn};
use validator::Validate;

use domain::{
    DomainError, DomainResult, NewUser, Password, Rating, Store, StoreFilter, User, UserRole,
    MAX_ADDRESS_LENGTH, RATINGS_KEY, STORES_KEY, USERS_KEY,
};

use crate::persistence::{MemoryStore, PersistenceGateway};

/// Headline counts for the administrator dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total_users: usize,
    pub total_stores: usize,
    pub total_ratings: usize,
}

/// 1 + the largest existing ID, or 1 for an empty collection.
fn next_id(ids: impl Iterator<Item = u64>) -> DomainResult<u64> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| DomainError::validation("No identifiers left in this collection")),
    }
}

/// Keep the first row for each key and drop later rows sharing it. Rows
/// without a key are always kept.
fn drop_duplicates<T, K: Eq + Hash>(
    rows: Vec<T>,
    collection: &str,
    field: &str,
    key: impl Fn(&T) -> Option<K>,
) -> Vec<T> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| match key(row).map(|k| seen.insert(k)) {
            Some(false) => {
                error!(collection, field, "Dropped persisted row with duplicate value");
                false
            }
            _ => true,
        })
        .collect()
}

fn consistent_users(users: Vec<User>) -> Vec<User> {
    let users = drop_duplicates(users, USERS_KEY, "id", |u| Some(u.id));
    drop_duplicates(users, USERS_KEY, "email", |u| {
        Some(u.email.trim().to_lowercase())
    })
}

fn consistent_stores(stores: Vec<Store>) -> Vec<Store> {
    let stores = drop_duplicates(stores, STORES_KEY, "id", |s| Some(s.id));
    drop_duplicates(stores, STORES_KEY, "ownerId", |s| s.owner_id)
}

fn consistent_ratings(ratings: Vec<Rating>) -> Vec<Rating> {
    let ratings: Vec<Rating> = ratings
        .into_iter()
        .filter(|r| match domain::validation::validate_rating(r.rating) {
            Ok(()) => true,
            Err(_) => {
                error!(rating_id = r.id, rating = r.rating, "Dropped persisted rating out of range");
                false
            }
        })
        .collect();
    let ratings = drop_duplicates(ratings, RATINGS_KEY, "id", |r| Some(r.id));
    drop_duplicates(ratings, RATINGS_KEY, "userId+storeId", |r| {
        Some((r.user_id, r.store_id))
    })
}

/// In-memory relational store with derived rating aggregates.
pub struct DomainStore {
    users: Vec<User>,
    stores: Vec<Store>,
    ratings: Vec<Rating>,
    gateway: PersistenceGateway,
}

impl DomainStore {
    /// Load all collections, seeding the default administrator when no users
    /// are persisted.
    pub fn open(gateway: PersistenceGateway) -> Self {
        Self::open_with_seed(gateway, vec![User::seed_admin()])
    }

    /// Load all collections, using `seed_users` when no users are persisted.
    /// Rows that break a uniqueness or range rule are dropped.
    pub fn open_with_seed(gateway: PersistenceGateway, seed_users: Vec<User>) -> Self {
        let users = consistent_users(gateway.load(USERS_KEY, seed_users));
        let stores = consistent_stores(gateway.load(STORES_KEY, Vec::new()));
        let ratings = consistent_ratings(gateway.load(RATINGS_KEY, Vec::new()));

        info!(
            users = users.len(),
            stores = stores.len(),
            ratings = ratings.len(),
            "Domain store opened"
        );

        Self {
            users,
            stores,
            ratings,
            gateway,
        }
    }

    /// Store backed by a process-local medium.
    pub fn in_memory() -> Self {
        Self::open(PersistenceGateway::new(MemoryStore::new()))
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Register a user after validating the candidate and checking that the
    /// email is not taken (case-insensitive).
    pub fn add_user(&mut self, candidate: NewUser) -> DomainResult<User> {
        let candidate = candidate.normalized();
        candidate.validate()?;

        if self.users.iter().any(|u| u.has_email(&candidate.email)) {
            warn!(email = %candidate.email, "Rejected user with duplicate email");
            return Err(DomainError::DuplicateEmail);
        }

        let user = User {
            id: next_id(self.users.iter().map(|u| u.id))?,
            name: candidate.name,
            email: candidate.email,
            address: candidate.address,
            role: candidate.role,
            password: Password::from_stored(candidate.password),
        };

        self.users.push(user.clone());
        self.persist_users();

        info!(user_id = user.id, role = %user.role, "User added");
        Ok(user)
    }

    /// Remove a user on behalf of an administrator. The acting administrator
    /// cannot remove itself. Ratings and stores of the removed user are kept.
    pub fn remove_user(&mut self, user_id: u64, requesting_admin_id: u64) -> DomainResult<()> {
        if user_id == requesting_admin_id {
            warn!(user_id, "Administrator attempted to remove itself");
            return Err(DomainError::Forbidden);
        }

        let requester_is_admin = self
            .find_user(requesting_admin_id)
            .is_some_and(User::is_admin);
        if !requester_is_admin {
            warn!(requesting_admin_id, "Non-administrator attempted to remove a user");
            return Err(DomainError::Forbidden);
        }

        let index = self
            .users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        self.users.remove(index);
        self.persist_users();

        info!(user_id, requesting_admin_id, "User removed");
        Ok(())
    }

    /// The user whose email (case-insensitive), password and role all match.
    pub fn authenticate(&self, email: &str, password: &str, role: UserRole) -> Option<&User> {
        self.users
            .iter()
            .find(|u| u.has_email(email) && u.password.verify(password) && u.role == role)
    }

    /// Replace a user's password after checking the current one.
    pub fn change_password(
        &mut self,
        user_id: u64,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        if !user.password.verify(current_password) {
            warn!(user_id, "Password change rejected: wrong current password");
            return Err(DomainError::WrongPassword);
        }

        user.password = Password::new(new_password)?;
        self.persist_users();

        info!(user_id, "Password changed");
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find_user(&self, user_id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    // =========================================================================
    // Stores
    // =========================================================================

    /// Open a store for a store owner. Each owner may hold at most one store.
    pub fn add_store(&mut self, owner_id: u64, name: &str, address: &str) -> DomainResult<Store> {
        let owner = self
            .find_user(owner_id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        if owner.role != UserRole::StoreOwner {
            warn!(owner_id, role = %owner.role, "Only store owners can open a store");
            return Err(DomainError::Forbidden);
        }

        if self.store_owned_by(owner_id).is_some() {
            warn!(owner_id, "Owner already has a store");
            return Err(DomainError::AlreadyOwnsStore);
        }

        let name = name.trim();
        let address = address.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Store name is required"));
        }
        if address.is_empty() {
            return Err(DomainError::validation("Store address is required"));
        }
        if address.chars().count() as u64 > MAX_ADDRESS_LENGTH {
            return Err(DomainError::validation(format!(
                "Address must be max {} characters",
                MAX_ADDRESS_LENGTH
            )));
        }

        let store = Store {
            id: next_id(self.stores.iter().map(|s| s.id))?,
            name: name.to_string(),
            address: address.to_string(),
            owner_id: Some(owner_id),
        };

        self.stores.push(store.clone());
        self.persist_stores();

        info!(store_id = store.id, owner_id, "Store added");
        Ok(store)
    }

    /// Rename a store. An empty name leaves the store unchanged.
    pub fn rename_store(&mut self, store_id: u64, new_name: &str) -> DomainResult<()> {
        let store = self
            .stores
            .iter_mut()
            .find(|s| s.id == store_id)
            .ok_or_else(|| DomainError::not_found("Store"))?;

        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(());
        }

        store.name = new_name.to_string();
        self.persist_stores();

        info!(store_id, "Store renamed");
        Ok(())
    }

    /// Remove a store. Ratings that reference it are kept.
    pub fn remove_store(&mut self, store_id: u64) -> DomainResult<()> {
        let index = self
            .stores
            .iter()
            .position(|s| s.id == store_id)
            .ok_or_else(|| DomainError::not_found("Store"))?;

        self.stores.remove(index);
        self.persist_stores();

        info!(store_id, "Store removed");
        Ok(())
    }

    /// Claimed stores whose name or address contains the query, ignoring case.
    pub fn list_stores(&self, filter: &StoreFilter) -> Vec<&Store> {
        let needle = filter.query.trim().to_lowercase();
        self.stores
            .iter()
            .filter(|s| s.owner_id.is_some() && s.matches(&needle))
            .collect()
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn find_store(&self, store_id: u64) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == store_id)
    }

    pub fn store_owned_by(&self, owner_id: u64) -> Option<&Store> {
        self.stores.iter().find(|s| s.is_owned_by(owner_id))
    }

    // =========================================================================
    // Ratings
    // =========================================================================

    /// Record a user's rating of a store, replacing their previous value in
    /// place when one exists.
    pub fn upsert_rating(&mut self, user_id: u64, store_id: u64, rating: u8) -> DomainResult<Rating> {
        domain::validation::validate_rating(rating)?;

        if self.find_user(user_id).is_none() {
            return Err(DomainError::not_found("User"));
        }
        if self.find_store(store_id).is_none() {
            return Err(DomainError::not_found("Store"));
        }

        let saved = match self
            .ratings
            .iter_mut()
            .find(|r| r.user_id == user_id && r.store_id == store_id)
        {
            Some(existing) => {
                existing.rating = rating;
                *existing
            }
            None => {
                let created = Rating {
                    id: next_id(self.ratings.iter().map(|r| r.id))?,
                    user_id,
                    store_id,
                    rating,
                };
                self.ratings.push(created);
                created
            }
        };
        self.persist_ratings();

        info!(rating_id = saved.id, user_id, store_id, rating, "Rating saved");
        Ok(saved)
    }

    /// Mean of all ratings for the store, rounded to one decimal place.
    /// `None` when the store has no ratings.
    pub fn overall_rating(&self, store_id: u64) -> Option<Decimal> {
        let (sum, count) = self
            .ratings
            .iter()
            .filter(|r| r.store_id == store_id)
            .fold((0u64, 0u64), |(sum, count), r| {
                (sum + u64::from(r.rating), count + 1)
            });

        if count == 0 {
            return None;
        }

        let mean = Decimal::from(sum) / Decimal::from(count);
        Some(mean.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn user_rating(&self, user_id: u64, store_id: u64) -> Option<&Rating> {
        self.ratings
            .iter()
            .find(|r| r.user_id == user_id && r.store_id == store_id)
    }

    pub fn ratings_for_store(&self, store_id: u64) -> Vec<&Rating> {
        self.ratings
            .iter()
            .filter(|r| r.store_id == store_id)
            .collect()
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total_users: self.users.len(),
            total_stores: self.stores.len(),
            total_ratings: self.ratings.len(),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist_users(&mut self) {
        self.gateway.save(USERS_KEY, &self.users);
    }

    fn persist_stores(&mut self) {
        self.gateway.save(STORES_KEY, &self.stores);
    }

    fn persist_ratings(&mut self) {
        self.gateway.save(RATINGS_KEY, &self.ratings);
    }
}
