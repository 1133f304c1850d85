// src/lib.rs

//! feedmirror: RSS to Telegram forwarder library

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
