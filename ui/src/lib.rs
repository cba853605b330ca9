//! Shared UI crate for Statlab. The data core and every view live here; the
//! desktop and web crates only launch them.

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}

pub use crate::core::sources::DataSources;
