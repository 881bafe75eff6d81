//! Angka Kredit credit-point engine
//!
//! This crate computes the credit points (angka kredit) earned by civil servants
//! in functional positions from their periodic performance assessments, and builds
//! the three statutory reports (Penetapan, Akumulasi and Konversi) from them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
