use sea_orm::ActiveValue;
use sea_orm::entity::prelude::*;

use crate::domain::fine_total;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub loan_id: i32,

    pub overdue_days: i32,

    pub daily_rate: i32,

    /// Always `overdue_days * daily_rate`; rewritten by `before_save`.
    pub total_amount: i64,

    pub paid: bool,

    pub generated_at: DateTimeUtc,

    pub paid_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::loans::Entity",
        from = "Column::LoanId",
        to = "super::loans::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Loans,
}

impl Related<super::loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

fn current<V>(value: &ActiveValue<V>) -> Option<V>
where
    V: Copy + Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(*v),
        ActiveValue::NotSet => None,
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Partial models (rate or days not loaded) keep whatever total they had.
        if let (Some(days), Some(rate)) = (current(&self.overdue_days), current(&self.daily_rate)) {
            self.total_amount = ActiveValue::Set(fine_total(days, rate));
        }
        Ok(self)
    }
}
