use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use clinic_auth::{password, AuthUser, JwtCodec, UserDirectory as _};

use super::error::DirectoryError;
use super::model::{
    Credentials, NewUser, Role, RoleListFilter, RoleUsage, User, UserChanges, UserListFilter,
};
use super::repo::{RoleRepository, UserRepository};
use super::service::{CreateUserParams, DirectoryService, UpdateUserParams};

const TEST_COST: u32 = 4;

fn sample_user(id: i32, email: &str, active: bool) -> User {
    User {
        id,
        first_name: "Mark".into(),
        last_name: "Santos".into(),
        email: email.into(),
        profile_photo: None,
        active,
        roles: vec![Role {
            id: 1,
            name: "Super Admin".into(),
        }],
        created_by: None,
        updated_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn actor() -> AuthUser {
    AuthUser {
        id: 1,
        first_name: "Root".into(),
        last_name: "Admin".into(),
        email: "root@clinic.local".into(),
        profile_photo: None,
        roles: vec!["Super Admin".into()],
    }
}

#[derive(Default)]
struct MockUsers {
    credentials: Option<Credentials>,
    user: Option<User>,
    /// Id of the user already holding the probed email, if any.
    email_taken_by: Option<i32>,
    rows_affected: bool,
}

#[async_trait]
impl UserRepository for MockUsers {
    async fn find_credentials(&self, _email: &str) -> anyhow::Result<Option<Credentials>> {
        Ok(self.credentials.clone())
    }

    async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.user.clone())
    }

    async fn find_active(&self, _id: i32, _email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.user.clone().filter(|u| u.active))
    }

    async fn email_in_use(&self, _email: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        Ok(match self.email_taken_by {
            Some(owner) => exclude_id != Some(owner),
            None => false,
        })
    }

    async fn insert(&self, new: NewUser) -> anyhow::Result<User> {
        let mut user = sample_user(99, &new.email, true);
        user.first_name = new.first_name;
        user.last_name = new.last_name;
        Ok(user)
    }

    async fn update(&self, _id: i32, changes: UserChanges) -> anyhow::Result<Option<User>> {
        Ok(self.user.clone().map(|mut u| {
            u.email = changes.email;
            u
        }))
    }

    async fn set_password(
        &self,
        _id: i32,
        _password_hash: &str,
        _actor: i32,
    ) -> anyhow::Result<bool> {
        Ok(self.rows_affected)
    }

    async fn deactivate(&self, _id: i32, _actor: i32) -> anyhow::Result<bool> {
        Ok(self.rows_affected)
    }

    async fn list(&self, _filter: UserListFilter) -> anyhow::Result<(Vec<User>, u64)> {
        Ok(self.user.clone().map_or((Vec::new(), 0), |u| (vec![u], 1)))
    }
}

#[derive(Default)]
struct MockRoles {
    role: Option<Role>,
    known_ids: Vec<i32>,
    name_taken_by: Option<i32>,
    user_count: u64,
}

#[async_trait]
impl RoleRepository for MockRoles {
    async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<Role>> {
        Ok(self.role.clone())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Role>> {
        Ok(ids
            .iter()
            .filter(|id| self.known_ids.contains(id))
            .map(|id| Role {
                id: *id,
                name: format!("role-{id}"),
            })
            .collect())
    }

    async fn name_in_use(&self, _name: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        Ok(match self.name_taken_by {
            Some(owner) => exclude_id != Some(owner),
            None => false,
        })
    }

    async fn insert(&self, name: &str) -> anyhow::Result<Role> {
        Ok(Role {
            id: 5,
            name: name.into(),
        })
    }

    async fn rename(&self, id: i32, name: &str) -> anyhow::Result<Option<Role>> {
        Ok(self.role.clone().map(|_| Role {
            id,
            name: name.into(),
        }))
    }

    async fn delete(&self, _id: i32) -> anyhow::Result<()> {
        Ok(())
    }

    async fn user_count(&self, _id: i32) -> anyhow::Result<u64> {
        Ok(self.user_count)
    }

    async fn list(&self, _filter: RoleListFilter) -> anyhow::Result<(Vec<RoleUsage>, u64)> {
        Ok((Vec::new(), 0))
    }
}

fn service(users: MockUsers, roles: MockRoles) -> DirectoryService {
    DirectoryService::new(
        Arc::new(users),
        Arc::new(roles),
        Arc::new(JwtCodec::new("service-test-secret", 1)),
        TEST_COST,
    )
}

fn credentials_for(raw_password: &str, active: bool) -> Credentials {
    Credentials {
        user: sample_user(7, "mark@clinic.local", active),
        password_hash: password::hash_password(raw_password, TEST_COST).unwrap(),
    }
}

#[tokio::test]
async fn login_with_correct_credentials_returns_token() {
    let svc = service(
        MockUsers {
            credentials: Some(credentials_for("12345678", true)),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let token = svc.login("mark@clinic.local", "12345678").await.unwrap();
    assert!(!token.is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let svc = service(
        MockUsers {
            credentials: Some(credentials_for("12345678", true)),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let err = svc
        .login("mark@clinic.local", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidCredentials));
}

#[tokio::test]
async fn login_with_unknown_email_is_rejected() {
    let svc = service(MockUsers::default(), MockRoles::default());
    let err = svc.login("ghost@clinic.local", "12345678").await.unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidCredentials));
}

#[tokio::test]
async fn login_with_deactivated_account_is_rejected() {
    let svc = service(
        MockUsers {
            credentials: Some(credentials_for("12345678", false)),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let err = svc
        .login("mark@clinic.local", "12345678")
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InvalidCredentials));
}

fn create_params(email: &str) -> CreateUserParams {
    CreateUserParams {
        first_name: "Jane".into(),
        last_name: "Reyes".into(),
        email: email.into(),
        password: "12345678".into(),
        profile_photo: None,
        role_ids: vec![2],
    }
}

#[tokio::test]
async fn create_user_rejects_duplicate_email() {
    let svc = service(
        MockUsers {
            email_taken_by: Some(3),
            ..Default::default()
        },
        MockRoles {
            known_ids: vec![2],
            ..Default::default()
        },
    );

    let err = svc
        .create_user(create_params("taken@clinic.local"), &actor())
        .await
        .unwrap_err();
    match err {
        DirectoryError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "email");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_rejects_unknown_role() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            known_ids: vec![1],
            ..Default::default()
        },
    );

    let mut params = create_params("new@clinic.local");
    params.role_ids = vec![1, 42];
    let err = svc.create_user(params, &actor()).await.unwrap_err();
    match err {
        DirectoryError::Validation(errors) => assert_eq!(errors[0].field, "roles"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_succeeds_with_fresh_email() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            known_ids: vec![2],
            ..Default::default()
        },
    );

    let user = svc
        .create_user(create_params("new@clinic.local"), &actor())
        .await
        .unwrap();
    assert_eq!(user.email, "new@clinic.local");
}

#[tokio::test]
async fn update_user_keeping_own_email_is_accepted() {
    let svc = service(
        MockUsers {
            user: Some(sample_user(3, "same@clinic.local", true)),
            // The probed email belongs to the user being updated.
            email_taken_by: Some(3),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let updated = svc
        .update_user(
            3,
            UpdateUserParams {
                first_name: "Mark".into(),
                last_name: "Santos".into(),
                email: "same@clinic.local".into(),
                role_ids: None,
                profile_photo: None,
            },
            &actor(),
        )
        .await
        .unwrap();
    assert_eq!(updated.email, "same@clinic.local");
}

#[tokio::test]
async fn change_password_on_missing_user_is_not_found() {
    let svc = service(MockUsers::default(), MockRoles::default());
    let err = svc
        .change_password(404, "new-password", &actor())
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::UserNotFound));
}

#[tokio::test]
async fn deactivate_missing_user_is_not_found() {
    let svc = service(MockUsers::default(), MockRoles::default());
    let err = svc.deactivate_user(404, &actor()).await.unwrap_err();
    assert!(matches!(err, DirectoryError::UserNotFound));
}

#[tokio::test]
async fn create_role_rejects_duplicate_name() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            name_taken_by: Some(1),
            ..Default::default()
        },
    );

    let err = svc.create_role("Reception").await.unwrap_err();
    match err {
        DirectoryError::Validation(errors) => assert_eq!(errors[0].field, "name"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn rename_role_to_its_own_name_is_accepted() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            role: Some(Role {
                id: 4,
                name: "Reception".into(),
            }),
            name_taken_by: Some(4),
            ..Default::default()
        },
    );

    let role = svc.rename_role(4, "Reception").await.unwrap();
    assert_eq!(role.name, "Reception");
}

#[tokio::test]
async fn delete_role_with_users_is_refused() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            role: Some(Role {
                id: 2,
                name: "Cashier".into(),
            }),
            user_count: 3,
            ..Default::default()
        },
    );

    let err = svc.delete_role(2).await.unwrap_err();
    match err {
        DirectoryError::RoleInUse(name) => assert_eq!(name, "Cashier"),
        other => panic!("expected role-in-use error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_unreferenced_role_succeeds() {
    let svc = service(
        MockUsers::default(),
        MockRoles {
            role: Some(Role {
                id: 2,
                name: "Cashier".into(),
            }),
            user_count: 0,
            ..Default::default()
        },
    );

    let role = svc.delete_role(2).await.unwrap();
    assert_eq!(role.name, "Cashier");
}

#[tokio::test]
async fn directory_lookup_skips_inactive_users() {
    let svc = service(
        MockUsers {
            user: Some(sample_user(7, "mark@clinic.local", false)),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let found = svc
        .find_active_user(7, "mark@clinic.local")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn directory_lookup_returns_sanitized_user() {
    let svc = service(
        MockUsers {
            user: Some(sample_user(7, "mark@clinic.local", true)),
            ..Default::default()
        },
        MockRoles::default(),
    );

    let found = svc
        .find_active_user(7, "mark@clinic.local")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, 7);
    assert_eq!(found.roles, vec!["Super Admin".to_owned()]);
}
