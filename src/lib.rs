//! Storefront state engine.
//!
//! Product catalog, cart, checkout, order history and an admin console,
//! run as a handful of tokio actors over in-memory seed data. The cart is
//! mirrored to a key-value slot after every change so it survives a
//! restart.
//!
//! [`app_system::StorefrontSystem`] boots everything and renders pages as
//! view models via [`routes::Route`].

pub mod actor_framework;
pub mod actors;
pub mod app_system;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod order_actor;
pub mod orders;
pub mod product_actor;
pub mod routes;
pub mod views;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
