// handlers/public/mod.rs - pages served to the browser and the login endpoint
pub mod login;
pub mod views;

pub use login::login;
pub use views::{health, login_view, main_view, spa_fallback};
