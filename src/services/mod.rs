// Services
// Services hold the page logic: bookmark source access, freshness checks,
// rendering, the tree controller and settings.

pub mod bookmark_source;
pub mod freshness_oracle;
pub mod settings_engine;
pub mod tree_controller;
pub mod tree_renderer;
