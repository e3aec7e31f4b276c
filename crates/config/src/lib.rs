//! Configuration loading and env substitution.
//!
//! Config files: `courier.toml`, `courier.yaml`, or `courier.json`
//! Searched in `./` then `~/.config/courier/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values, and the
//! `TELEGRAM_BOT_TOKEN` / `TELEGRAM_API_URL` environment overrides.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{apply_env_overrides, discover_and_load, load_config, load_or_discover},
    schema::{CourierConfig, ServerConfig, TelegramConfig},
};
