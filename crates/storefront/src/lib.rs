//! Funky Teens storefront widgets.
//!
//! Login popup with a locally persisted session, and a shopping-cart overlay
//! with locally persisted items. Both widgets live in one [`state::AppState`]
//! that the host page drives with UI events; [`render::Renderer`] turns the
//! state into HTML fragments.
//!
//! ```rust,ignore
//! let config = StorefrontConfig::from_env()?;
//! telemetry::init(config.log_format);
//!
//! let mut state = AppState::open(config)?;
//! for effect in state.dispatch(UiEvent::PageLoaded { path: "/".into() }) {
//!     // apply effect
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::{AppState, Effect, Region, UiEvent};
