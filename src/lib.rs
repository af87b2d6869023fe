pub mod auth;
pub mod configuration;
pub mod database;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod startup;
pub mod telemetry;
pub mod validators;
