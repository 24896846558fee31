pub mod connection;
pub mod sink;

pub use connection::connect;
pub use sink::{write_batches, BatchSink, MySqlSink};
