// Daily driver trend: chart description and net-change summary
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
