//! Lists Module
//!
//! User-owned, named lists of media items. Each item is an opaque JSON record
//! identified by its external `id` and carrying an optional per-list
//! `userRating`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mediolist::lists::{self, Lists};
//! use mediolist::store::SqlListStore;
//!
//! let app = Router::new()
//!     .nest("/lists", lists::routes())
//!     .with_state(app_state);
//!
//! let lists = Lists::new(SqlListStore::new(db.connection()));
//! let outcome = lists.add_item_to_lists(&ids, item).await?;
//! ```

mod handler;
mod routes;
mod service;
mod sync;

pub use routes::routes;
pub use service::*;
pub use sync::*;
