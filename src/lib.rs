//! Margem Certa - Profitability analytics for restaurant delivery dishes
//!
//! This crate computes per-dish profitability, persists calculation history
//! to a hosted relational store and produces strategy recommendations
//! through a generative-AI service with a deterministic rule-based fallback.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
