use sea_orm::entity::prelude::*;

use crate::domain::UserType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// National identity document number, unique per member.
    #[sea_orm(unique)]
    pub national_id: String,

    pub name: String,

    pub email: String,

    pub phone: String,

    pub user_type: UserType,

    /// Set when a late return produces a fine, cleared once all fines are settled.
    pub blocked: bool,

    pub registered_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::loans::Entity")]
    Loans,
}

impl Related<super::loans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
