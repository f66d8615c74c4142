//! Dispatch planning, the tick-driven controller, and reporting for the
//! Blaze dispatch simulation.
//!
//! This crate owns the state machine that moves a single firefighting unit
//! across the region graph: choose a fire, travel to it one waypoint per
//! tick, knock it down one level per tick, return to base when the tanks
//! run short, and build a report once every fire is out.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `dispatch-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- [`DispatchController`], the `step()` state machine.
//! - [`error`] -- [`SimulationError`] for construction and internal failures.
//! - [`fires`] -- [`FireMap`], per-region fire intensities.
//! - [`planner`] -- Greedy next-target selection.
//! - [`report`] -- The end-of-run [`Report`].
//! - [`runner`] -- Bounded loop driving the controller to a terminal phase.
//! - [`sink`] -- [`EventSink`] trait for controller notifications.
//!
//! [`DispatchController`]: controller::DispatchController
//! [`SimulationError`]: error::SimulationError
//! [`FireMap`]: fires::FireMap
//! [`Report`]: report::Report
//! [`EventSink`]: sink::EventSink

pub mod config;
pub mod controller;
pub mod error;
pub mod fires;
pub mod planner;
pub mod report;
pub mod runner;
pub mod sink;
