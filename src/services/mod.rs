pub mod media_info;
pub mod prompts;
pub mod providers;
pub mod recommendations;
pub mod render;
