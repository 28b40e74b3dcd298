// src/services/capabilities.rs

use crate::{common::error::AppError, models::auth::Role};

// A tabela declarativa papel → capacidades, avaliada antes de cada comando.
// Substitui comparações de string espalhadas pela interface. ATENÇÃO:
// isso é só UX. O servidor revalida tudo; nada aqui é fronteira de
// segurança.

/// O que cada tela/ação exige.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    // Listagens da filial e busca (balcão).
    ReservationsView,
    // Transições do fluxo de reserva (confirmar, cancelar, concluir...).
    ReservationsTransition,
    // Criar reservas e ver as próprias.
    ReservationsCreate,
    // Todo o fluxo de contrato (criar, editar, upload, caução).
    ContractsManage,
    ConfigView,
    ConfigEdit,
    // Perfis de inquilinos/parceiros/funcionários.
    ProfilesManage,
}

impl Capability {
    pub fn slug(&self) -> &'static str {
        match self {
            Capability::ReservationsView => "reservations:view",
            Capability::ReservationsTransition => "reservations:transition",
            Capability::ReservationsCreate => "reservations:create",
            Capability::ContractsManage => "contracts:manage",
            Capability::ConfigView => "config:view",
            Capability::ConfigEdit => "config:edit",
            Capability::ProfilesManage => "profiles:manage",
        }
    }
}

// A tabela em si. Uma linha por papel, nada calculado em tempo de execução.
pub fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Guest | Role::Tenant => &[Capability::ReservationsCreate],
        Role::Partner => &[Capability::ReservationsView],
        Role::Staff => &[
            Capability::ReservationsView,
            Capability::ReservationsTransition,
            Capability::ContractsManage,
            Capability::ConfigView,
        ],
        Role::Admin => &[
            Capability::ReservationsView,
            Capability::ReservationsTransition,
            Capability::ReservationsCreate,
            Capability::ContractsManage,
            Capability::ConfigView,
            Capability::ConfigEdit,
            Capability::ProfilesManage,
        ],
    }
}

pub fn role_allows(role: Role, capability: Capability) -> bool {
    capabilities(role).contains(&capability)
}

// O guardião usado pelos comandos: sem sessão é NotAuthenticated,
// com sessão sem a capacidade é PermissionDenied.
pub fn require(role: Option<Role>, capability: Capability) -> Result<(), AppError> {
    let role = role.ok_or(AppError::NotAuthenticated)?;
    if role_allows(role, capability) {
        Ok(())
    } else {
        Err(AppError::PermissionDenied(capability.slug()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_runs_the_reservation_workflow_but_not_config_edit() {
        assert!(role_allows(Role::Staff, Capability::ReservationsTransition));
        assert!(role_allows(Role::Staff, Capability::ContractsManage));
        assert!(!role_allows(Role::Staff, Capability::ConfigEdit));
        assert!(!role_allows(Role::Staff, Capability::ProfilesManage));
    }

    #[test]
    fn tenants_only_create_and_view_their_own() {
        assert_eq!(
            capabilities(Role::Tenant),
            &[Capability::ReservationsCreate]
        );
        assert!(!role_allows(Role::Tenant, Capability::ReservationsTransition));
    }

    #[test]
    fn admin_has_every_capability() {
        for capability in [
            Capability::ReservationsView,
            Capability::ReservationsTransition,
            Capability::ReservationsCreate,
            Capability::ContractsManage,
            Capability::ConfigView,
            Capability::ConfigEdit,
            Capability::ProfilesManage,
        ] {
            assert!(role_allows(Role::Admin, capability));
        }
    }

    #[test]
    fn missing_session_is_not_authenticated() {
        assert!(matches!(
            require(None, Capability::ReservationsView),
            Err(AppError::NotAuthenticated)
        ));
        assert!(matches!(
            require(Some(Role::Guest), Capability::ConfigEdit),
            Err(AppError::PermissionDenied("config:edit"))
        ));
    }
}
