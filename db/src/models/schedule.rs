use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set};
use serde::Serialize;

use crate::error::DomainError;

/// Timetable slot. Reference data only; sessions do not depend on it at
/// runtime beyond the class it points at.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    pub day_of_week: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id"
    )]
    Teacher,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        class_id: i64,
        teacher_id: i64,
        subject: &str,
        start_time: &str,
        end_time: &str,
        day_of_week: &str,
    ) -> Result<Self, DomainError> {
        if super::class::Model::find_by_id(db, class_id).await?.is_none() {
            return Err(DomainError::NotFound("class"));
        }

        let active = ActiveModel {
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            subject: Set(subject.to_owned()),
            start_time: Set(start_time.to_owned()),
            end_time: Set(end_time.to_owned()),
            day_of_week: Set(day_of_week.to_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        Ok(active.insert(db).await?)
    }

    pub async fn list(
        db: &DatabaseConnection,
        class_id: Option<i64>,
        teacher_id: Option<i64>,
    ) -> Result<Vec<Self>, DomainError> {
        let mut query = Entity::find();
        if let Some(class_id) = class_id {
            query = query.filter(Column::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = teacher_id {
            query = query.filter(Column::TeacherId.eq(teacher_id));
        }
        Ok(query.all(db).await?)
    }
}
