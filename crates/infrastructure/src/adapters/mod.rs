//! Adapters bridging the application ports to the integration clients

mod geoapify_adapter;
mod tranzy_adapter;

pub use geoapify_adapter::GeoapifyAdapter;
pub use tranzy_adapter::TranzyAdapter;
