// Library exports for the formcheck binary and tests
pub mod config;
pub mod display;
pub mod models;
pub mod services;
pub mod theme;
pub mod validation;
