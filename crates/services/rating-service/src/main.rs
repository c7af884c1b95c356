//! Rating Service - command-line front end for the store rating platform.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use domain::validation::confirm_password;
use domain::{NewUser, Store, User, UserResponse, UserRole};
use rating_service_lib::config::RatingServiceConfig;
use rating_service_lib::service::{
    format_rating, AdminSession, OwnerSession, Session, ShopperSession, Sortable, Sorter,
    StoreSortKey, UserSortKey,
};
use rating_service_lib::DomainStore;

#[derive(Parser)]
#[command(name = "rating-service")]
#[command(about = "Discover, rate and manage stores")]
struct Cli {
    /// Directory holding the persisted collections (overrides RATING_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a normal user or store owner account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long, value_enum, default_value = "user")]
        role: SignupRole,
    },
    /// Change the password of the given account
    ChangePassword {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        new_password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Administrator: dashboard totals
    Stats {
        #[command(flatten)]
        admin: Credentials,
    },
    /// Administrator: add a user with any role
    AddUser {
        #[command(flatten)]
        admin: Credentials,
        #[arg(long)]
        name: String,
        #[arg(long = "user-email")]
        user_email: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long = "user-password")]
        user_password: String,
        #[arg(long, value_enum, default_value = "user")]
        role: RoleArg,
    },
    /// Administrator: remove a user
    RemoveUser {
        #[command(flatten)]
        admin: Credentials,
        #[arg(long)]
        id: u64,
    },
    /// Administrator: remove a store
    RemoveStore {
        #[command(flatten)]
        admin: Credentials,
        #[arg(long)]
        id: u64,
    },
    /// Administrator: list users
    Users {
        #[command(flatten)]
        admin: Credentials,
        #[arg(long, value_enum)]
        sort: Option<UserColumn>,
        #[arg(long)]
        desc: bool,
    },
    /// Administrator: list stores with their overall rating
    StoreTable {
        #[command(flatten)]
        admin: Credentials,
        #[arg(long, value_enum)]
        sort: Option<StoreColumn>,
        #[arg(long)]
        desc: bool,
    },
    /// Normal user: search stores by name or address
    Stores {
        #[command(flatten)]
        user: Credentials,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Normal user: submit or modify a rating
    Rate {
        #[command(flatten)]
        user: Credentials,
        #[arg(long)]
        store: u64,
        #[arg(long)]
        value: u8,
    },
    /// Store owner: open your store
    OpenStore {
        #[command(flatten)]
        owner: Credentials,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
    /// Store owner: rename your store
    RenameStore {
        #[command(flatten)]
        owner: Credentials,
        #[arg(long)]
        name: String,
    },
    /// Store owner: overall rating and ratings received
    Dashboard {
        #[command(flatten)]
        owner: Credentials,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SignupRole {
    User,
    Owner,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Admin,
    User,
    Owner,
}

impl From<SignupRole> for UserRole {
    fn from(role: SignupRole) -> Self {
        match role {
            SignupRole::User => UserRole::NormalUser,
            SignupRole::Owner => UserRole::StoreOwner,
        }
    }
}

impl From<RoleArg> for UserRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => UserRole::Administrator,
            RoleArg::User => UserRole::NormalUser,
            RoleArg::Owner => UserRole::StoreOwner,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum UserColumn {
    Id,
    Name,
    Email,
    Address,
    Role,
}

impl From<UserColumn> for UserSortKey {
    fn from(column: UserColumn) -> Self {
        match column {
            UserColumn::Id => UserSortKey::Id,
            UserColumn::Name => UserSortKey::Name,
            UserColumn::Email => UserSortKey::Email,
            UserColumn::Address => UserSortKey::Address,
            UserColumn::Role => UserSortKey::Role,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreColumn {
    Id,
    Name,
    Address,
}

impl From<StoreColumn> for StoreSortKey {
    fn from(column: StoreColumn) -> Self {
        match column {
            StoreColumn::Id => StoreSortKey::Id,
            StoreColumn::Name => StoreSortKey::Name,
            StoreColumn::Address => StoreSortKey::Address,
        }
    }
}

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = RatingServiceConfig::from_env().with_data_dir(cli.data_dir);

    // Initialize tracing (stderr, stdout carries command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut store = rating_service_lib::open_store(&config);

    match run(cli.command, &mut store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error [{}]: {}", e.code(), e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, store: &mut DomainStore) -> AppResult<()> {
    match command {
        Commands::Signup {
            name,
            email,
            address,
            password,
            confirm_password: confirmation,
            role,
        } => {
            confirm_password(&password, &confirmation)?;
            let user = store.add_user(NewUser::new(name, email, address, role.into(), password))?;
            println!("Signed up {} <{}> as {} (id {})", user.name, user.email, user.role, user.id);
        }
        Commands::ChangePassword {
            credentials,
            role,
            new_password,
            confirm_password: confirmation,
        } => {
            confirm_password(&new_password, &confirmation)?;
            let session = login(store, &credentials, role.into())?;
            session.change_password(store, &credentials.password, &new_password)?;
            println!("Password updated");
        }
        Commands::Stats { admin } => {
            let admin = as_admin(store, &admin)?;
            let stats = admin.stats(store);
            println!("Total users:   {}", stats.total_users);
            println!("Total stores:  {}", stats.total_stores);
            println!("Total ratings: {}", stats.total_ratings);
        }
        Commands::AddUser {
            admin,
            name,
            user_email,
            address,
            user_password,
            role,
        } => {
            let admin = as_admin(store, &admin)?;
            let candidate = NewUser::new(name, user_email, address, role.into(), user_password);
            let user = admin.add_user(store, candidate)?;
            println!("Added {} <{}> as {} (id {})", user.name, user.email, user.role, user.id);
        }
        Commands::RemoveUser { admin, id } => {
            let admin = as_admin(store, &admin)?;
            admin.remove_user(store, id)?;
            println!("Removed user {}", id);
        }
        Commands::RemoveStore { admin, id } => {
            let admin = as_admin(store, &admin)?;
            admin.remove_store(store, id)?;
            println!("Removed store {}", id);
        }
        Commands::Users { admin, sort, desc } => {
            as_admin(store, &admin)?;
            let sorter: Sorter<User> = column_sorter(sort.map(UserSortKey::from), desc);
            for user in sorter.sorted(store.users()).into_iter().map(UserResponse::from) {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    user.id, user.name, user.email, user.address, user.role
                );
            }
        }
        Commands::StoreTable { admin, sort, desc } => {
            as_admin(store, &admin)?;
            let sorter: Sorter<Store> = column_sorter(sort.map(StoreSortKey::from), desc);
            for s in sorter.sorted(store.stores()) {
                println!(
                    "{}\t{}\t{}\t{}",
                    s.id,
                    s.name,
                    s.address,
                    format_rating(store.overall_rating(s.id))
                );
            }
        }
        Commands::Stores { user, query } => {
            let shopper = as_shopper(store, &user)?;
            let listings = shopper.browse(store, &query);
            if listings.is_empty() {
                println!("No stores found");
            }
            for listing in listings {
                let mine = listing
                    .my_rating
                    .map(|r| format!("{} ★", r))
                    .unwrap_or_else(|| "Not rated".to_string());
                println!(
                    "{}\t{}\t{}\toverall {} ★\tyours {}",
                    listing.store.id,
                    listing.store.name,
                    listing.store.address,
                    format_rating(listing.overall_rating),
                    mine
                );
            }
        }
        Commands::Rate { user, store: store_id, value } => {
            let shopper = as_shopper(store, &user)?;
            let rating = shopper.rate(store, store_id, value)?;
            println!(
                "Rated store {} with {} ★ (overall {})",
                rating.store_id,
                rating.rating,
                format_rating(store.overall_rating(rating.store_id))
            );
        }
        Commands::OpenStore {
            owner,
            name,
            address,
        } => {
            let owner = as_owner(store, &owner)?;
            let opened = owner.open_store(store, &name, &address)?;
            println!("Opened {} at {} (id {})", opened.name, opened.address, opened.id);
        }
        Commands::RenameStore { owner, name } => {
            let owner = as_owner(store, &owner)?;
            owner.rename_store(store, &name)?;
            println!("Store renamed");
        }
        Commands::Dashboard { owner } => {
            let owner = as_owner(store, &owner)?;
            let Some(dashboard) = owner.dashboard(store) else {
                println!("You have not opened a store yet");
                return Ok(());
            };

            println!("{} ({})", dashboard.store.name, dashboard.store.address);
            println!("Overall rating: {} ★", format_rating(dashboard.overall_rating));
            if dashboard.reviews.is_empty() {
                println!("Your store has not received any ratings yet.");
            }
            for review in dashboard.reviews {
                println!(
                    "{}\t{}\t{} ★",
                    review.rater_name,
                    review.rater_email.unwrap_or_default(),
                    review.rating
                );
            }
        }
    }

    Ok(())
}

/// Sorter for a column header clicked once (ascending) or twice (descending).
fn column_sorter<T: Sortable>(key: Option<T::Key>, descending: bool) -> Sorter<T> {
    let mut sorter = Sorter::new();
    if let Some(key) = key {
        sorter.request_sort(key);
        if descending {
            sorter.request_sort(key);
        }
    }
    sorter
}

fn login(store: &DomainStore, credentials: &Credentials, role: UserRole) -> AppResult<Session> {
    Ok(Session::login(
        store,
        &credentials.email,
        &credentials.password,
        role,
    )?)
}

fn as_admin(store: &DomainStore, credentials: &Credentials) -> AppResult<AdminSession> {
    match login(store, credentials, UserRole::Administrator)? {
        Session::Administrator(admin) => Ok(admin),
        _ => Err(AppError::Forbidden),
    }
}

fn as_shopper(store: &DomainStore, credentials: &Credentials) -> AppResult<ShopperSession> {
    match login(store, credentials, UserRole::NormalUser)? {
        Session::NormalUser(shopper) => Ok(shopper),
        _ => Err(AppError::Forbidden),
    }
}

fn as_owner(store: &DomainStore, credentials: &Credentials) -> AppResult<OwnerSession> {
    match login(store, credentials, UserRole::StoreOwner)? {
        Session::StoreOwner(owner) => Ok(owner),
        _ => Err(AppError::Forbidden),
    }
}
