pub mod broadsheet;
pub mod core;
pub mod ranking;
pub mod results;
