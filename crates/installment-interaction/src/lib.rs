//! Remote resource accessors for the installment admin client.
//!
//! [`GatewayClient`] performs the HTTP calls; the `Http*Repository` types
//! implement the repository ports of `installment-core` on top of it.

pub mod authorized_gateway;
pub mod gateway_client;
pub mod http_application_repository;
pub mod http_auth_repository;
pub mod http_contract_repository;
pub mod http_dashboard_repository;
pub mod http_plan_repository;

pub use authorized_gateway::AuthorizedGateway;
pub use gateway_client::GatewayClient;
pub use http_application_repository::HttpApplicationRepository;
pub use http_auth_repository::HttpAuthRepository;
pub use http_contract_repository::HttpContractRepository;
pub use http_dashboard_repository::HttpDashboardRepository;
pub use http_plan_repository::HttpPlanRepository;
