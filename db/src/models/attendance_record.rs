use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, DatabaseConnection, PaginatorTrait, QueryFilter};
use serde::Serialize;

use crate::error::DomainError;

pub const STATUS_PRESENT: &str = "present";

/// Permanent, deduplicated proof that a student completed the challenge for
/// a session. The composite primary key (session, student) is the uniqueness
/// invariant; there is no update path.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,

    pub class_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::attendance_session::Entity",
        from = "Column::SessionId",
        to = "super::attendance_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::attendance_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// The read consumers rely on before accepting a new challenge request.
    pub async fn exists(
        db: &DatabaseConnection,
        student_id: i64,
        session_id: &str,
    ) -> Result<bool, DomainError> {
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SessionId.eq(session_id))
            .one(db)
            .await?
            .is_some())
    }

    pub async fn list_filtered(
        db: &DatabaseConnection,
        class_id: Option<i64>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Self>, DomainError> {
        let mut query = Entity::find();
        if let Some(class_id) = class_id {
            query = query.filter(Column::ClassId.eq(class_id));
        }
        if let Some(from) = from {
            query = query.filter(Column::RecordedAt.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(Column::RecordedAt.lte(to));
        }
        Ok(query.all(db).await?)
    }

    pub async fn count_for_student_between(
        db: &DatabaseConnection,
        student_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::RecordedAt.gte(from))
            .filter(Column::RecordedAt.lt(to))
            .count(db)
            .await?)
    }

    pub async fn count_between(
        db: &DatabaseConnection,
        class_id: Option<i64>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let mut query = Entity::find()
            .filter(Column::RecordedAt.gte(from))
            .filter(Column::RecordedAt.lt(to));
        if let Some(class_id) = class_id {
            query = query.filter(Column::ClassId.eq(class_id));
        }
        Ok(query.count(db).await?)
    }
}
