use sea_orm::{entity::prelude::*, NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored product. `id` and both timestamps are assigned on insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub cost: f64,
    pub price: f64,
    pub stock: i32,
    pub active: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields accepted when creating a product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateInput {
    pub name: String,
    pub cost: f64,
    pub price: f64,
    pub stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(default = true)]
    pub active: Option<bool>,
}

impl ProductCreateInput {
    /// Insertable row; `active` falls back to `true`, both timestamps are `now`.
    pub fn into_active_model(self, now: DateTimeWithTimeZone) -> ActiveModel {
        ActiveModel {
            id: NotSet,
            name: Set(self.name),
            cost: Set(self.cost),
            price: Set(self.price),
            stock: Set(self.stock),
            active: Set(self.active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ProductUpdateInput {
    /// Write the supplied fields into `am` and refresh `updated_at`.
    pub fn apply(self, am: &mut ActiveModel, now: DateTimeWithTimeZone) {
        if let Some(name) = self.name { am.name = Set(name); }
        if let Some(cost) = self.cost { am.cost = Set(cost); }
        if let Some(price) = self.price { am.price = Set(price); }
        if let Some(stock) = self.stock { am.stock = Set(stock); }
        if let Some(active) = self.active { am.active = Set(active); }
        am.updated_at = Set(now);
    }
}
