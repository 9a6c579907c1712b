pub mod config;
pub mod controller;
pub mod navigation;
pub mod output;
pub mod pages;
pub mod projector;
pub mod scoring;
pub mod seed;
pub mod server;
pub mod store;
pub mod types;
