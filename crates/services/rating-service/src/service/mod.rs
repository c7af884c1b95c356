//! Service layer - the domain store and the views built on top of it.

mod domain_store;
pub mod session;
pub mod sort;

pub use domain_store::{DomainStore, StoreStats};
pub use session::{
    format_rating, AdminSession, OwnerDashboard, OwnerSession, Review, Session, ShopperSession,
    StoreListing, StoreRow,
};
pub use sort::{sort, SortConfig, SortDirection, Sortable, Sorter, StoreSortKey, UserSortKey};
