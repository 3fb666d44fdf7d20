pub mod consistency_model;
pub mod consistency_service;
pub mod consistency_traits;

pub use consistency_model::ConsistencyMode;
pub use consistency_service::ConsistencyService;
pub use consistency_traits::ConsistencyServiceTrait;
