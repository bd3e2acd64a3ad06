// src/discord/mod.rs
mod client;
mod events;
pub mod commands;
mod platform;
pub use client::DiscordClient;
pub use platform::SerenityPlatform;
