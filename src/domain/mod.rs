// Domain layer - pure trend transformations
pub mod chart;
pub mod format;
pub mod panel;
pub mod trend;
pub mod verdict;
