//! Address book: domain types, the repository capability, concrete stores and
//! the lifecycle service.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use domain::{Address, AddressPatch};
pub use repository::AddressRepository;
pub use service::AddressService;
