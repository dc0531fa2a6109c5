pub mod role_permissions;
pub mod roles;
pub mod user_permissions;
pub mod user_roles;
pub mod users;

pub use role_permissions::{
    ActiveModel as RolePermissionActiveModel, Column as RolePermissionColumn, Entity as RolePermissions,
    Model as RolePermission,
};
pub use roles::{ActiveModel as RoleActiveModel, Column as RoleColumn, Entity as Roles, Model as Role};
pub use user_permissions::{
    ActiveModel as UserPermissionActiveModel, Column as UserPermissionColumn, Entity as UserPermissions,
    Model as UserPermission,
};
pub use user_roles::{
    ActiveModel as UserRoleActiveModel, Column as UserRoleColumn, Entity as UserRoles, Model as UserRole,
};
pub use users::{ActiveModel as UserActiveModel, Column as UserColumn, Entity as Users, Model as User};
