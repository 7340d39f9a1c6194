use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use std::sync::Arc;

use super::sea_orm_entity::{categories, posts};
use crate::announcement::application::domain::entities::Category;
use crate::announcement::application::ports::outgoing::{CategoryQuery, CategoryQueryError};

#[derive(Clone, Debug)]
pub struct CategoryQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CategoryQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Active post counts keyed by category id. Categories without posts are absent.
    async fn active_post_counts(
        &self,
        category_ids: Vec<i32>,
    ) -> Result<HashMap<i32, u64>, CategoryQueryError> {
        let rows: Vec<(i32, i64)> = posts::Entity::find()
            .select_only()
            .column(posts::Column::CategoryId)
            .column_as(Expr::col(posts::Column::Id).count(), "post_count")
            .filter(posts::Column::IsActive.eq(true))
            .filter(posts::Column::CategoryId.is_in(category_ids))
            .group_by(posts::Column::CategoryId)
            .into_tuple()
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, u64::try_from(count).unwrap_or(0)))
            .collect())
    }
}

fn map_db_err(e: DbErr) -> CategoryQueryError {
    CategoryQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl CategoryQuery for CategoryQueryPostgres {
    async fn list(
        &self,
        parent_id: Option<i32>,
        include_counts: bool,
    ) -> Result<Vec<Category>, CategoryQueryError> {
        let mut query = categories::Entity::find();
        if let Some(parent_id) = parent_id {
            query = query.filter(categories::Column::ParentId.eq(parent_id));
        }

        let models = query
            .order_by_asc(categories::Column::Name)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        if !include_counts || models.is_empty() {
            return Ok(models.into_iter().map(|m| m.into_category(None)).collect());
        }

        let counts = self
            .active_post_counts(models.iter().map(|m| m.id).collect())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| {
                let count = counts.get(&m.id).copied().unwrap_or(0);
                m.into_category(Some(count))
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, CategoryQueryError> {
        let Some(model) = categories::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let count = self
            .active_post_counts(vec![model.id])
            .await?
            .get(&model.id)
            .copied()
            .unwrap_or(0);

        Ok(Some(model.into_category(Some(count))))
    }
}
