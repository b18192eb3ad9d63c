pub mod bot;

pub use bot::{ComputerStrategy, PlayPlanner, Tactic, TradePlanner};
