pub mod cache;
pub mod classifier;
pub mod controller;
pub mod grouper;
pub mod history;
pub mod locale;
pub mod provider;
pub mod selection;
pub mod slot;
pub mod tier;
pub mod view_state;
