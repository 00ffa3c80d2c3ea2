//! Car Dealership API
//!
//! Servicio REST para administrar carros y sus motores sobre PostgreSQL.
//! Capas: rutas HTTP → servicio de carros → repositorios (cars, engines).

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
