//! Sub commands

pub mod machine_info;
pub mod machines;
pub mod quality_history;
pub mod record_quality;
pub mod record_sale;
