//! Carpool coordination server.
//!
//! Matches riders with drivers who head to the same place at the same time:
//! a driver qualifies when the rider's home lies inside the driver's
//! reachability zone and both groups' days start (or end) together.

pub mod cache;
pub mod config;
pub mod domain;
pub mod groups;
pub mod matching;
pub mod reachability;
pub mod roster;
pub mod timetable;
pub mod untis;
pub mod web;
