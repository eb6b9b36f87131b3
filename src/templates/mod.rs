//! HTML templates

pub mod layout;
pub mod login;
pub mod notice;
pub mod settings;

pub use layout::{page, site_head};
pub use login::render_login;
pub use notice::render_notice;
pub use settings::render_form;
