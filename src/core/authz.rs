//! Authorization gate and role-permission table.
//!
//! The permission table is static data: adding a role to a resource/action is
//! a one-line change to [`allowed_roles`], not new imperative code per route.
//! The gate itself is a pure decision function over the caller's verified
//! identity; for owner-scoped resources (sales, clients) the caller's core
//! module fetches the record once and hands it to [`authorize_record`].
//!
//! Lookups fail closed: a role name that is not in the table resolves to no
//! permissions at all, never to a default grant.

use crate::{
    entities::{client, sale},
    errors::{Error, Result},
};

/// The roles known to the permission table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Role {
    /// Full access to everything, bypasses ownership checks
    Administrador,
    /// Finance: expenses, payments, sales reporting
    Contador,
    /// Sales and clients (own records only)
    Vendedor,
    /// Inventory management
    Inventario,
    /// Employee: reads the task calendar
    Colaborador,
    /// Production supervisor: suppliers, collaborators, calendar
    Supervisor,
}

impl Role {
    /// Maps a stored role name to its table entry. Unknown names yield `None`,
    /// which the gate treats as the empty permission set.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Administrador General" => Some(Self::Administrador),
            "Contador / Finanzas" => Some(Self::Contador),
            "Vendedor" => Some(Self::Vendedor),
            "Encargado de Inventario" => Some(Self::Inventario),
            "Colaborador / Empleado" => Some(Self::Colaborador),
            "Supervisor de Producción" => Some(Self::Supervisor),
            _ => None,
        }
    }

    /// The role name as stored in the `roles` table.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Administrador => "Administrador General",
            Self::Contador => "Contador / Finanzas",
            Self::Vendedor => "Vendedor",
            Self::Inventario => "Encargado de Inventario",
            Self::Colaborador => "Colaborador / Empleado",
            Self::Supervisor => "Supervisor de Producción",
        }
    }

    /// All seeded roles, in seeding order.
    pub const ALL: [Self; 6] = [
        Self::Administrador,
        Self::Contador,
        Self::Vendedor,
        Self::Inventario,
        Self::Colaborador,
        Self::Supervisor,
    ];
}

/// Resource types guarded by the gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resource {
    /// `clientes` table (owner-scoped)
    Clients,
    /// `ventas` table (owner-scoped)
    Sales,
    /// `inventario` table
    Inventory,
    /// `gastos` table
    Expenses,
    /// `proveedores` table
    Suppliers,
    /// `pagos` table
    Payments,
    /// `colaboradores` table
    Collaborators,
    /// `calendarios` table
    Calendar,
    /// `users` and `roles` tables
    Users,
    /// `sequences` table
    Sequences,
}

impl Resource {
    /// Whether mutation rights on this resource depend on who created the
    /// record, not just the caller's role.
    pub const fn is_owner_scoped(self) -> bool {
        matches!(self, Self::Clients | Self::Sales)
    }
}

/// Actions a caller can perform on a resource.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// List or fetch records
    Read,
    /// Insert a record
    Create,
    /// Modify an existing record
    Update,
    /// Remove a record
    Delete,
}

/// A caller whose credential has been verified.
///
/// `role` is `None` when the stored role name is not in the permission table;
/// such a caller is authenticated but holds no permissions.
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// User id, used for ownership checks
    pub id: i64,
    /// Login name, used in log lines
    pub username: String,
    /// Resolved role, `None` for unknown role names
    pub role: Option<Role>,
}

/// A record whose mutation rights depend on its creator.
pub trait OwnerScoped {
    /// The id of the user who created this record.
    fn owner_id(&self) -> i64;
}

impl OwnerScoped for sale::Model {
    fn owner_id(&self) -> i64 {
        self.created_by
    }
}

impl OwnerScoped for client::Model {
    fn owner_id(&self) -> i64 {
        self.created_by
    }
}

/// The role-permission table.
///
/// Rows follow the read surface of each resource, with sparse stricter
/// overrides on destructive actions (e.g. everyone in finance reads expenses
/// but only an administrator deletes one).
const fn allowed_roles(resource: Resource, action: Action) -> &'static [Role] {
    use Action as A;
    use Resource as R;
    use Role as Ro;

    match (resource, action) {
        (R::Clients, _) => &[Ro::Administrador, Ro::Vendedor],

        (R::Sales, A::Read) => &[Ro::Administrador, Ro::Contador, Ro::Vendedor],
        (R::Sales, _) => &[Ro::Administrador, Ro::Vendedor],

        (R::Inventory, A::Read) => &[
            Ro::Administrador,
            Ro::Vendedor,
            Ro::Inventario,
            Ro::Supervisor,
        ],
        (R::Inventory, _) => &[Ro::Administrador, Ro::Inventario],

        (R::Expenses, A::Read) => &[Ro::Administrador, Ro::Contador, Ro::Vendedor],
        (R::Expenses, A::Create | A::Update) => &[Ro::Administrador, Ro::Contador],
        (R::Expenses, A::Delete) => &[Ro::Administrador],

        (R::Suppliers, A::Read | A::Create) => &[Ro::Administrador, Ro::Inventario, Ro::Supervisor],
        (R::Suppliers, A::Update) => &[Ro::Administrador, Ro::Supervisor],
        (R::Suppliers, A::Delete) => &[Ro::Administrador],

        (R::Payments, A::Delete) => &[Ro::Administrador],
        (R::Payments, _) => &[Ro::Administrador, Ro::Contador],

        (R::Collaborators, A::Read) => &[Ro::Administrador, Ro::Supervisor],
        (R::Collaborators, _) => &[Ro::Administrador],

        (R::Calendar, A::Read) => &[Ro::Administrador, Ro::Colaborador, Ro::Supervisor],
        (R::Calendar, A::Create | A::Update) => &[Ro::Administrador, Ro::Supervisor],
        (R::Calendar, A::Delete) => &[Ro::Administrador],

        (R::Users, _) => &[Ro::Administrador],

        (R::Sequences, A::Read | A::Update) => &[Ro::Administrador, Ro::Vendedor],
        (R::Sequences, _) => &[],
    }
}

/// Whether `role` may perform `action` on `resource`.
pub fn is_allowed(role: Role, resource: Resource, action: Action) -> bool {
    allowed_roles(resource, action).contains(&role)
}

/// Role check: deny with `Forbidden` unless the caller's role grants the
/// (resource, action) pair. Callers with an unknown role are denied.
pub fn authorize(caller: &AuthUser, resource: Resource, action: Action) -> Result<()> {
    let allowed = caller
        .role
        .is_some_and(|role| is_allowed(role, resource, action));

    if allowed {
        Ok(())
    } else {
        Err(Error::Forbidden {
            message: format!("role of '{}' may not {action:?} {resource:?}", caller.username),
        })
    }
}

/// Role check plus ownership check for owner-scoped resources.
///
/// Administrators bypass the ownership check; everyone else may only mutate
/// records they created. The record is fetched by the calling core module
/// (missing records surface as `NotFound` there, before this gate runs).
pub fn authorize_record<R: OwnerScoped>(
    caller: &AuthUser,
    resource: Resource,
    action: Action,
    record: &R,
) -> Result<()> {
    authorize(caller, resource, action)?;

    if resource.is_owner_scoped()
        && matches!(action, Action::Update | Action::Delete)
        && caller.role != Some(Role::Administrador)
        && record.owner_id() != caller.id
    {
        return Err(Error::Forbidden {
            message: format!(
                "'{}' may only {action:?} their own {resource:?} records",
                caller.username
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{caller_with_role, caller_without_role};

    fn sale_owned_by(user_id: i64) -> sale::Model {
        sale::Model {
            id: 1,
            cliente: "Finca El Roble".to_string(),
            producto: "Café".to_string(),
            cantidad: 10.0,
            precio_unitario: 5.0,
            total: 50.0,
            fecha: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            estado_pago: crate::core::ESTADO_PENDIENTE.to_string(),
            created_by: user_id,
        }
    }

    #[test]
    fn test_role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_name(role.name()), Some(role));
        }
    }

    #[test]
    fn test_unknown_role_name_resolves_to_none() {
        assert_eq!(Role::from_name("Gerente"), None);
        assert_eq!(Role::from_name(""), None);
    }

    #[test]
    fn test_permission_table_spot_checks() {
        // Payments are finance-only; deletion is administrator-only.
        assert!(is_allowed(Role::Contador, Resource::Payments, Action::Create));
        assert!(!is_allowed(Role::Vendedor, Resource::Payments, Action::Read));
        assert!(!is_allowed(Role::Contador, Resource::Payments, Action::Delete));
        assert!(is_allowed(Role::Administrador, Resource::Payments, Action::Delete));

        // Sparse override: all finance roles read expenses, only admin deletes.
        assert!(is_allowed(Role::Vendedor, Resource::Expenses, Action::Read));
        assert!(!is_allowed(Role::Contador, Resource::Expenses, Action::Delete));

        // Sequences are closed to creation/deletion for everyone.
        assert!(!is_allowed(Role::Administrador, Resource::Sequences, Action::Create));
        assert!(is_allowed(Role::Vendedor, Resource::Sequences, Action::Update));
    }

    #[test]
    fn test_authorize_denies_unknown_role() {
        let caller = caller_without_role(9);
        let err = authorize(&caller, Resource::Calendar, Action::Read).unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_authorize_allows_granted_pair() {
        let caller = caller_with_role(3, Role::Contador);
        authorize(&caller, Resource::Payments, Action::Create).unwrap();
    }

    #[test]
    fn test_ownership_denies_foreign_record() {
        let caller = caller_with_role(7, Role::Vendedor);
        let record = sale_owned_by(8);
        let err =
            authorize_record(&caller, Resource::Sales, Action::Delete, &record).unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
    }

    #[test]
    fn test_ownership_allows_own_record() {
        let caller = caller_with_role(7, Role::Vendedor);
        let record = sale_owned_by(7);
        authorize_record(&caller, Resource::Sales, Action::Delete, &record).unwrap();
    }

    #[test]
    fn test_administrator_bypasses_ownership() {
        let caller = caller_with_role(1, Role::Administrador);
        let record = sale_owned_by(42);
        authorize_record(&caller, Resource::Sales, Action::Delete, &record).unwrap();
    }

    #[test]
    fn test_ownership_not_checked_on_read() {
        // Reads are role-gated only; a vendedor may list sales created by others.
        let caller = caller_with_role(7, Role::Vendedor);
        let record = sale_owned_by(8);
        authorize_record(&caller, Resource::Sales, Action::Read, &record).unwrap();
    }
}
