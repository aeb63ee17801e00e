// calisthenics-tui/src/app.rs
mod input;
mod modals;
pub mod navigation_helpers;
pub mod state;

pub use state::{ActiveModal, ActiveTab, App, FormField};
