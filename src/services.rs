pub mod auth_service;
pub use auth_service::AuthService;
pub mod capabilities;
pub use capabilities::Capability;
pub mod contract_service;
pub use contract_service::ContractFlow;
pub mod reservation_service;
pub use reservation_service::ReservationWorkflow;
