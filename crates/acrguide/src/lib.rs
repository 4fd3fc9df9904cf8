//! Clinical decision support for radiology follow-up guidelines.
//!
//! A fixed catalogue of published guidelines (Fleischner, Lung-RADS, TI-RADS,
//! LI-RADS, PI-RADS and friends) maps a structured finding to a severity tier,
//! a recommendation and supporting notes.

pub mod config;
pub mod error;
pub mod guidelines;
pub mod telemetry;
