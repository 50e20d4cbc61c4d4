pub mod action_selection;
pub mod agent;
pub mod env;
pub mod policy;
pub mod render;
pub mod utils;
