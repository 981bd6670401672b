//! Simple web server
//!
//! Serves files from a document root, one request per connection.

pub mod config;
pub mod http;
pub mod server;
