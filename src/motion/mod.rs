//! Time-driven state: the idle rotation scheduler, the showcase spotlight and
//! the timers they own.

pub mod scheduler;
pub mod showcase;
pub mod timer;
