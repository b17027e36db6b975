// Trade execution and portfolio accounting
pub mod portfolio;

pub use portfolio::Portfolio;
