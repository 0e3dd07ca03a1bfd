pub mod server;
pub mod sync;
