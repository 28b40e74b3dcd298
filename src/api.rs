pub mod http;
pub use http::ApiHttp;
pub mod auth_api;
pub use auth_api::AuthApi;
pub mod reservation_api;
pub use reservation_api::ReservationApi;
pub mod contract_api;
pub use contract_api::ContractApi;
pub mod management_api;
pub use management_api::ManagementApi;
pub mod settings_api;
pub use settings_api::SettingsApi;
