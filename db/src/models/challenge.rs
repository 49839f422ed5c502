use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;

use crate::error::{DomainError, is_unique_violation};
use crate::models::{attendance_record, attendance_session};

/// A short-lived one-time code tied to one student and one session.
///
/// Several live challenges may exist for the same pair (a student may scan
/// twice before verifying); the first successful verification consumes all
/// of them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub session_id: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub consumed: bool,
    pub created_at: DateTime<Utc>,
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

impl ActiveModelBehavior for ActiveModel {}

/// Uniform 6-digit code; leading zeros are significant, hence the string.
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..=999_999);
    format!("{n:06}")
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        student_id: i64,
        session_id: &str,
        code: &str,
        now: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Result<Self, DomainError> {
        let active = ActiveModel {
            student_id: Set(student_id),
            session_id: Set(session_id.to_owned()),
            code: Set(code.to_owned()),
            expires_at: Set(now + Duration::minutes(ttl_minutes)),
            consumed: Set(false),
            created_at: Set(now),
            ..Default::default()
        };
        Ok(active.insert(db).await?)
    }

    /// Exact-match lookup among unconsumed challenges. `None` deliberately
    /// covers both a wrong code and an already-consumed one.
    pub async fn find_live(
        db: &DatabaseConnection,
        student_id: i64,
        session_id: &str,
        code: &str,
    ) -> Result<Option<Self>, DomainError> {
        Ok(Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::Code.eq(code))
            .filter(Column::Consumed.eq(false))
            .one(db)
            .await?)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Commits the attendance record and consumes every live challenge for
    /// this (student, session) pair in one transaction.
    ///
    /// The record insert rides on the table's composite primary key: if a
    /// concurrent verification already committed, the insert hits a unique
    /// violation and the whole transaction unwinds as `Conflict`. No path
    /// creates a record without consuming, or consumes without a record.
    pub async fn consume_and_record(
        &self,
        db: &DatabaseConnection,
        session: &attendance_session::Model,
        now: DateTime<Utc>,
    ) -> Result<attendance_record::Model, DomainError> {
        let txn = db.begin().await?;

        let record = attendance_record::ActiveModel {
            session_id: Set(self.session_id.clone()),
            student_id: Set(self.student_id),
            class_id: Set(session.class_id),
            teacher_id: Set(session.teacher_id),
            subject: Set(session.subject.clone()),
            status: Set(attendance_record::STATUS_PRESENT.to_owned()),
            recorded_at: Set(now),
        };

        let record = match record.insert(&txn).await {
            Ok(record) => record,
            Err(e) => {
                let domain = if is_unique_violation(&e) {
                    DomainError::Conflict("attendance already recorded".into())
                } else {
                    e.into()
                };
                txn.rollback().await.ok();
                return Err(domain);
            }
        };

        // Consume this challenge and any live siblings so an older code can
        // no longer verify.
        let consumed = Entity::update_many()
            .col_expr(Column::Consumed, Expr::value(true))
            .filter(Column::StudentId.eq(self.student_id))
            .filter(Column::SessionId.eq(self.session_id.as_str()))
            .filter(Column::Consumed.eq(false))
            .exec(&txn)
            .await;
        if let Err(e) = consumed {
            txn.rollback().await.ok();
            return Err(e.into());
        }

        txn.commit().await?;
        Ok(record)
    }
}
