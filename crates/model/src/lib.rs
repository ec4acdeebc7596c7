pub mod case;
pub mod chart;
pub mod errors;
pub mod notificator;
pub mod operation;
pub mod region;
pub mod reply;
pub mod source;
pub mod vaccination;
