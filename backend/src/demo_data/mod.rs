//! Startup wiring for demonstration book seeding.

mod startup;

pub use startup::{StartupSeedingError, seed_demo_books_on_startup};
