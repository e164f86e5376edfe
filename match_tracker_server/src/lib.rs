//! # Match tracker server
//! The HTTP front end of the match tracker. It is responsible for:
//! * Accepting match and subscription registrations from clients.
//! * Handling the result check and notification callbacks from the push task queue.
//! * Wiring the engine APIs to the football data API, the task queue and the webhook transport.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `GET /health`: health check.
//! * `POST /api/matches`, `GET /api/matches/{id}`: register and inspect tracked matches.
//! * `POST /api/subscriptions`, `DELETE /api/subscriptions`: manage result webhooks.
//! * `POST /tasks/check-result`, `POST /tasks/notify-subscriber`: task queue callbacks.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
