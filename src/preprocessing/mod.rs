//! Audio preprocessing modules
//!
//! This module contains utilities for preparing audio for alignment:
//! - Peak normalization
//! - Linear-interpolation resampling to a common analysis rate
//! - Channel mixing (multi-channel to mono)

pub mod channel_mixer;
pub mod normalization;
pub mod resample;
