//! # Sargassum Drift Engine
//!
//! Geospatial derivation and visual-density engine for predicted sargassum
//! drift along the Yucatán peninsula.
//!
//! A prediction provider returns an ordered list of coordinates with floating
//! biomass areas. This crate turns that list into an animated, steppable map
//! overlay and derives coastal risk statistics from the arrival point.
//!
//! ## Features
//!
//! - **Data Adapter**: Reorders the provider payload chronologically and
//!   classifies each sample's density, with a fixed fallback on failure
//! - **Density Fields**: Randomised two-layer particle clouds sized by biomass area
//! - **Impact Engine**: Great-circle proximity of coastal sites to the arrival point
//! - **Statistics**: Total biomass, high-risk site count and nearest-site ranking
//! - **Animation**: Steppable, playable frame sequence with site filtering
//! - **HTTP API**: JSON endpoints over the engine (feature `http-server`)
//!
//! ## Architecture
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`config`]: TOML configuration with environment overrides
//! - [`models`]: Geographic primitives, drift records, coastal registry, filters
//! - [`source`]: Prediction data source trait, HTTP and in-memory implementations
//! - [`services`]: Adapter, density field, impact, statistics and animation
//! - [`render`]: Draw commands, render surface trait and scene composition
//! - [`http`]: Axum-based HTTP server and request handlers

#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod models;
pub mod render;
pub mod services;
pub mod source;

#[cfg(feature = "http-server")]
pub mod http;
