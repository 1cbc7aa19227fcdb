//! Host side of the orrery: the fixed-timestep frame loop, the built-in
//! system catalog, and the glue from config to a running simulation.

pub mod catalog;
pub mod frame_loop;
pub mod platform;
pub mod session;
