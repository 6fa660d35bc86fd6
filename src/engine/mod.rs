pub mod progress;
pub mod resolver;
pub mod status;
pub mod timeline;
pub mod view;
