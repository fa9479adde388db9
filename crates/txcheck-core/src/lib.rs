pub mod catalog;
pub mod chains;
pub mod client;
pub mod error;
pub mod gateway;
pub mod network;
pub mod transport;
pub mod types;
pub mod units;

pub use error::{CoreError, UpstreamError};
pub use gateway::{Endpoints, Gateway, TxLookup};
pub use network::{ChainFamily, LookupRequest, Network};
pub use types::LookupResult;
