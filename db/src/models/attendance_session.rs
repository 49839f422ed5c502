use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde::Serialize;
use uuid::Uuid;

use crate::error::DomainError;

/// A teacher-issued, time-boxed invitation for one class and subject.
/// Immutable once created; it becomes unusable after `expires_at` but is
/// never deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendance_sessions")]
pub struct Model {
    /// Random UUID, so session ids cannot be guessed from one another.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub class_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    /// Opaque string embedded in the QR artifact; see [`SessionPayload`].
    pub payload: String,
    pub expires_at: DateTime<Utc>,
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
    #[sea_orm(has_many = "super::attendance_record::Entity")]
    Records,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::attendance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Records.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The triple a QR artifact carries: `attendance:{session}:{class}:{teacher}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    pub session_id: String,
    pub class_id: i64,
    pub teacher_id: i64,
}

impl SessionPayload {
    const PREFIX: &'static str = "attendance";

    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            Self::PREFIX,
            self.session_id,
            self.class_id,
            self.teacher_id
        )
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let mut parts = raw.splitn(4, ':');
        let (prefix, session_id, class_id, teacher_id) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        );
        match (prefix, session_id, class_id, teacher_id) {
            (Some(Self::PREFIX), Some(sid), Some(cid), Some(tid)) if !sid.is_empty() => {
                let class_id = cid
                    .parse()
                    .map_err(|_| DomainError::Validation("malformed session payload".into()))?;
                let teacher_id = tid
                    .parse()
                    .map_err(|_| DomainError::Validation("malformed session payload".into()))?;
                Ok(Self {
                    session_id: sid.to_owned(),
                    class_id,
                    teacher_id,
                })
            }
            _ => Err(DomainError::Validation("malformed session payload".into())),
        }
    }
}

impl Model {
    /// Creates a session valid for `ttl_minutes` from `now`. The single
    /// insert is the only side effect.
    pub async fn create(
        db: &DatabaseConnection,
        class_id: i64,
        teacher_id: i64,
        subject: &str,
        now: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Result<Self, DomainError> {
        let id = Uuid::new_v4().to_string();
        let payload = SessionPayload {
            session_id: id.clone(),
            class_id,
            teacher_id,
        }
        .encode();

        let active = ActiveModel {
            id: Set(id),
            class_id: Set(class_id),
            teacher_id: Set(teacher_id),
            subject: Set(subject.to_owned()),
            payload: Set(payload),
            expires_at: Set(now + Duration::minutes(ttl_minutes)),
            created_at: Set(now),
        };
        Ok(active.insert(db).await?)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<Self>, DomainError> {
        Ok(Entity::find_by_id(id.to_owned()).one(db).await?)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
