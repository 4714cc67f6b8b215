pub mod api_handler;
pub mod export;
pub mod health_handler;
pub mod workspace;
