//! Infrastructure layer - storage backends, auth machinery, logging

pub mod account;
pub mod auth;
pub mod logging;
pub mod migrations;
pub mod session;
pub mod task;
