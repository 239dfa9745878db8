//! Asteroids RL — a small wrapped-screen asteroid shooter.
//!
//! The simulation core (`entities`, `kinematics`, `spawn`, `collision`,
//! `compute`) is pure game logic over fixed-capacity entity pools.  The
//! terminal front end lives in the binary.

pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod spawn;
