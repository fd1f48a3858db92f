// Gateway module for the remote assistant - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod gateway;
mod health;
mod http;

// Public re-exports - the ONLY way to access assistant functionality
pub use gateway::{AssistantGateway, ChatEndpoint};
pub use health::is_backend_reachable;
pub use http::HttpAssistant;
