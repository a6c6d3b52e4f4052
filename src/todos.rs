use chrono::naive::NaiveDateTime;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}
