use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{DomainError, is_unique_violation};

/// Represents an account in the `users` table.
///
/// Staff roles authenticate by email + password. Learners carry no password
/// and authenticate by their (roll number, email) pair instead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique across all accounts.
    pub email: String,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub department_id: Option<i64>,
    pub class_id: Option<i64>,
    /// Roll identifier, learners only.
    pub roll_no: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed set of capability levels. Stored as a string column.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "org_owner")]
    OrgOwner,

    #[sea_orm(string_value = "org_admin")]
    OrgAdmin,

    #[sea_orm(string_value = "class_owner")]
    ClassOwner,

    #[sea_orm(string_value = "class_assistant")]
    ClassAssistant,

    #[sea_orm(string_value = "learner")]
    Learner,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn hash_password(password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| DomainError::Validation(format!("failed to hash password: {e}")))
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let Some(hash) = self.password_hash.as_deref() else {
            return false;
        };
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Inserts a new account. `password` must be `Some` for every role except
    /// `Learner`, where it is ignored if present.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        email: &str,
        username: &str,
        password: Option<&str>,
        role: Role,
        department_id: Option<i64>,
        class_id: Option<i64>,
        roll_no: Option<&str>,
    ) -> Result<Self, DomainError> {
        if Self::find_by_email(db, email).await?.is_some() {
            return Err(DomainError::Conflict(
                "an account with this email already exists".into(),
            ));
        }

        let password_hash = match (role, password) {
            (Role::Learner, _) => None,
            (_, Some(p)) => Some(Self::hash_password(p)?),
            (_, None) => {
                return Err(DomainError::Validation(
                    "password is required for this role".into(),
                ));
            }
        };

        let now = Utc::now();
        let active = ActiveModel {
            email: Set(email.to_owned()),
            username: Set(username.to_owned()),
            role: Set(role),
            password_hash: Set(password_hash),
            department_id: Set(department_id),
            class_id: Set(class_id),
            roll_no: Set(roll_no.map(str::to_owned)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("an account with this email already exists".into())
            } else {
                e.into()
            }
        })
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<Self>, DomainError> {
        Ok(Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<Self>, DomainError> {
        Ok(Entity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?)
    }

    /// Password login for staff roles. The same `Unauthenticated` comes back
    /// for an unknown email and a wrong password.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        email: &str,
        password: &str,
    ) -> Result<Self, DomainError> {
        let user = Self::find_by_email(db, email)
            .await?
            .ok_or(DomainError::Unauthenticated)?;
        if user.role == Role::Learner || !user.is_active || !user.verify_password(password) {
            return Err(DomainError::Unauthenticated);
        }
        Ok(user)
    }

    /// Learner login by (roll number, email) pair.
    pub async fn verify_learner(
        db: &DatabaseConnection,
        roll_no: &str,
        email: &str,
    ) -> Result<Self, DomainError> {
        Entity::find()
            .filter(Column::RollNo.eq(roll_no))
            .filter(Column::Email.eq(email))
            .filter(Column::Role.eq(Role::Learner))
            .filter(Column::IsActive.eq(true))
            .one(db)
            .await?
            .ok_or(DomainError::Unauthenticated)
    }

    pub async fn list_learners(
        db: &DatabaseConnection,
        class_id: Option<i64>,
    ) -> Result<Vec<Self>, DomainError> {
        let mut query = Entity::find().filter(Column::Role.eq(Role::Learner));
        if let Some(class_id) = class_id {
            query = query.filter(Column::ClassId.eq(class_id));
        }
        Ok(query.all(db).await?)
    }

    pub async fn count_learners(db: &DatabaseConnection) -> Result<u64, DomainError> {
        use sea_orm::PaginatorTrait;
        Ok(Entity::find()
            .filter(Column::Role.eq(Role::Learner))
            .count(db)
            .await?)
    }

    pub async fn exists_with_role(
        db: &DatabaseConnection,
        role: Role,
    ) -> Result<bool, DomainError> {
        Ok(Entity::find()
            .filter(Column::Role.eq(role))
            .one(db)
            .await?
            .is_some())
    }
}
