//! Planetary-system gravity and spatial-query simulation
//!
//! Once per frame: advance planets and mazes, find the planet and system
//! nearest the reference point, pull every gravity receiver toward whichever
//! of them owns its patch of space, and burn whatever drifts into a sun's hot
//! shell.

pub mod celestial;
pub mod config;
pub mod constants;
pub mod damage;
pub mod error;
pub mod gravity;
pub mod nearest;
pub mod planet_manager;
pub mod scenario;
pub mod simulation;
