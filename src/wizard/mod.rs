pub mod assembler;
pub mod commands;
pub mod controller;
pub mod state;
pub mod store;

pub use controller::{WizardController, WizardSnapshot};
