pub mod config;
pub mod game;
pub mod input;
pub mod navigation;
pub mod render;
pub mod rng;
pub mod store;
pub mod summary;
pub mod tracker;
pub mod world;
