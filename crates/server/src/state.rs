use std::sync::Arc;

use service::address::{AddressRepository, AddressService};

/// Shared handler state. Cloning is cheap; the service only holds an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub addresses: AddressService<dyn AddressRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn AddressRepository>) -> Self {
        Self { addresses: AddressService::new(repo) }
    }
}
