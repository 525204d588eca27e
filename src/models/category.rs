use serde::{Deserialize, Serialize};

/// Product category. Referenced by products via `category_id`; the category
/// list itself is owned by the backend and only cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
}
