//! Infrastructure layer for Botforge.
//!
//! Contains implementations of the ports defined in `botforge-core`:
//! a PostgREST-style HTTP record store, a SQLite record store for local
//! use, an OpenAI-compatible completion provider, and the TOML config loader.

pub mod config;
pub mod llm;
pub mod record;
pub mod rest;
pub mod sqlite;
pub mod store;
