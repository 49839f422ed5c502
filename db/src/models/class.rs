use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Serialize;

use crate::error::DomainError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub department_id: i64,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::attendance_session::Entity")]
    Sessions,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Fails with `NotFound` when the owning department does not exist.
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        department_id: i64,
        created_by: i64,
    ) -> Result<Self, DomainError> {
        if super::department::Model::find_by_id(db, department_id)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound("department"));
        }

        let active = ActiveModel {
            name: Set(name.to_owned()),
            department_id: Set(department_id),
            created_by: Set(created_by),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(active.insert(db).await?)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<Self>, DomainError> {
        Ok(Entity::find_by_id(id).one(db).await?)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<Self>, DomainError> {
        Ok(Entity::find().all(db).await?)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DomainError> {
        use sea_orm::PaginatorTrait;
        Ok(Entity::find().count(db).await?)
    }
}
