// Wire boundary: request/response shapes and the JSON-lines server.

pub mod dto;
pub mod server;
