pub mod pipeline;
pub mod providers;
