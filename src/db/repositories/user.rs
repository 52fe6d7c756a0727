use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::entities::{prelude::*, users};
use crate::models::User;

use super::user_to_domain;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Adds the user unless the username is already taken, in which case
    /// nothing happens. Seeding the same account twice must not fail and
    /// must not touch the original row.
    pub async fn add(&self, user: &User) -> Result<()> {
        let txn = self.conn.begin().await?;

        let existing = Users::find()
            .filter(users::Column::Username.eq(user.username()))
            .one(&txn)
            .await?;
        if existing.is_some() {
            debug!("username {} already registered, leaving as-is", user.username());
            txn.commit().await?;
            return Ok(());
        }

        users::ActiveModel {
            id: Set(user.id()),
            username: Set(user.username().to_string()),
            password: Set(user.password().to_string()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.trim().to_lowercase();
        let model = Users::find()
            .filter(users::Column::Username.eq(&username))
            .one(&self.conn)
            .await?;
        Ok(match model {
            Some(m) => Some(user_to_domain(&m)?),
            None => None,
        })
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let models = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.conn)
            .await?;
        models
            .iter()
            .map(|m| user_to_domain(m).map_err(Into::into))
            .collect()
    }
}
