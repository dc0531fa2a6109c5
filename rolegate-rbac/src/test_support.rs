//! In-memory repository implementations for engine tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use rolegate_interfaces::{
    AssignmentRepository, DatabaseError, MatrixRepository, Repository, Role, RoleId, RoleRepository, UserDirectory,
    UserId,
};

#[derive(Default)]
struct State {
    next_role_id: RoleId,
    next_user_id: UserId,
    roles: Vec<Role>,
    user_roles: Vec<(UserId, RoleId)>,
    user_permissions: Vec<(UserId, String)>,
    cells: HashMap<(RoleId, String), bool>,
    users: Vec<UserId>,
}

/// A single shared store handing out trait objects over one state
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                next_role_id: 1,
                next_user_id: 1,
                ..Default::default()
            })),
        }
    }

    pub fn seed_user(&self) -> UserId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_user_id;
        state.next_user_id += 1;
        state.users.push(id);
        id
    }

    pub fn roles(&self) -> Arc<dyn RoleRepository> {
        Arc::new(self.clone())
    }

    pub fn assignments(&self) -> Arc<dyn AssignmentRepository> {
        Arc::new(self.clone())
    }

    pub fn matrix(&self) -> Arc<dyn MatrixRepository> {
        Arc::new(self.clone())
    }

    pub fn users(&self) -> Arc<dyn UserDirectory> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl Repository for InMemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state.roles.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state.roles.iter().find(|r| r.name == name).cloned())
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Role>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(names
            .iter()
            .filter_map(|name| state.roles.iter().find(|r| &r.name == name).cloned())
            .collect())
    }

    async fn find_or_create(&self, name: &str) -> Result<Role, DatabaseError> {
        let mut state = self.state.lock().unwrap();
        if let Some(role) = state.roles.iter().find(|r| r.name == name) {
            return Ok(role.clone());
        }

        let role = Role {
            id: state.next_role_id,
            name: name.to_string(),
            created_at: chrono::Utc::now(),
        };
        state.next_role_id += 1;
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn list(&self) -> Result<Vec<Role>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state.roles.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn exists(&self, user_id: UserId) -> Result<bool, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.contains(&user_id))
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<Role>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .user_roles
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, rid)| state.roles.iter().find(|r| r.id == *rid).cloned())
            .collect())
    }

    async fn permissions_for_user(&self, user_id: UserId) -> Result<Vec<String>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .user_permissions
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn replace_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        state
            .user_roles
            .retain(|(uid, rid)| *uid != user_id || role_ids.contains(rid));
        for rid in role_ids {
            if !state.user_roles.contains(&(user_id, *rid)) {
                state.user_roles.push((user_id, *rid));
            }
        }
        Ok(())
    }

    async fn add_user_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        for rid in role_ids {
            if !state.user_roles.contains(&(user_id, *rid)) {
                state.user_roles.push((user_id, *rid));
            }
        }
        Ok(())
    }

    async fn add_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        for p in permissions {
            if !state.user_permissions.iter().any(|(uid, held)| *uid == user_id && held == p) {
                state.user_permissions.push((user_id, p.clone()));
            }
        }
        Ok(())
    }

    async fn replace_user_permissions(&self, user_id: UserId, permissions: &[String]) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        state
            .user_permissions
            .retain(|(uid, held)| *uid != user_id || permissions.contains(held));
        for p in permissions {
            if !state.user_permissions.iter().any(|(uid, held)| *uid == user_id && held == p) {
                state.user_permissions.push((user_id, p.clone()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MatrixRepository for InMemoryStore {
    async fn matrix(&self, catalog: &[String]) -> Result<HashMap<RoleId, HashMap<String, bool>>, DatabaseError> {
        let state = self.state.lock().unwrap();
        let mut matrix: HashMap<RoleId, HashMap<String, bool>> = state
            .roles
            .iter()
            .map(|r| (r.id, catalog.iter().map(|p| (p.clone(), false)).collect()))
            .collect();

        for ((role_id, permission), enabled) in &state.cells {
            if let Some(row) = matrix.get_mut(role_id) {
                if let Some(value) = row.get_mut(permission) {
                    *value = *enabled;
                }
            }
        }

        Ok(matrix)
    }

    async fn enabled_permissions(&self, role_id: RoleId, catalog: &[String]) -> Result<Vec<String>, DatabaseError> {
        let state = self.state.lock().unwrap();
        Ok(catalog
            .iter()
            .filter(|p| {
                state
                    .cells
                    .get(&(role_id, (*p).clone()))
                    .copied()
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn update_matrix(&self, updates: &HashMap<RoleId, HashMap<String, bool>>) -> Result<(), DatabaseError> {
        let mut state = self.state.lock().unwrap();
        for (role_id, cells) in updates {
            for (permission, enabled) in cells {
                state.cells.insert((*role_id, permission.clone()), *enabled);
            }
        }
        Ok(())
    }
}
