pub mod assistant;
pub mod interpreter;
pub mod recipe;
pub mod scaling;
pub mod session;
pub mod settings;
pub mod shopping;
pub mod speech;
pub mod storage;

mod engine;
pub mod error;

pub use engine::CookingEngine;
