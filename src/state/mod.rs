//! State management for the MapMyWaste client.
//!
//! This module contains the headless state core:
//! - Report cache with publish-subscribe refresh notifications
//! - Pending map selection for the report form
//! - Admin panel filter/search/confirmation state
//! - Route overlay state machine
//! - Report form draft

mod admin;
mod form;
mod overlay;
mod picker;
mod store;
mod types;

pub use admin::*;
pub use form::*;
pub use overlay::*;
pub use picker::*;
pub use store::*;
pub use types::*;
