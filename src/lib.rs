pub mod http_server;
pub mod layered_config;
pub mod menu;
pub mod store;

pub use http_server::create_router;
pub use layered_config::Config;
pub use menu::Menu;
pub use store::{SharedStore, Task, TaskStore};
