pub mod history;
pub mod simulation_mode;
