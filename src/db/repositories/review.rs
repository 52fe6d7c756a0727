use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::entities::{prelude::*, reviews};
use crate::models::{Review, ReviewTarget};

use super::user_to_domain;

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Append-only. The stored shape keeps the podcast target; the review's
    /// author must already exist as a user row.
    pub async fn save(&self, review: &Review) -> Result<()> {
        let txn = self.conn.begin().await?;

        reviews::ActiveModel {
            id: Set(review.id()),
            user_id: Set(review.user().id()),
            podcast_id: Set(review.podcast_id()),
            rating: Set(review.rating()),
            content: Set(review.content().to_string()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_for_podcast(&self, podcast_id: i32) -> Result<Vec<Review>> {
        let rows = Reviews::find()
            .filter(reviews::Column::PodcastId.eq(podcast_id))
            .order_by_asc(reviews::Column::Id)
            .find_also_related(Users)
            .all(&self.conn)
            .await?;

        let mut reviews = Vec::with_capacity(rows.len());
        for (model, user_model) in rows {
            let user_model = user_model
                .with_context(|| format!("review {} references a missing user", model.id))?;
            let user = user_to_domain(&user_model)?;
            let target = ReviewTarget::Podcast(model.podcast_id.unwrap_or(podcast_id));
            reviews.push(Review::new(
                model.id,
                user,
                model.rating,
                &model.content,
                target,
            )?);
        }
        Ok(reviews)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Reviews::find().count(&self.conn).await?)
    }
}
