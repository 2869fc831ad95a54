use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use nimbus_domain::pagination::Page;
use nimbus_domain::user::UserRole;
use nimbus_users_schema::users;

use crate::domain::query::{UserFilter, UserQuery};
use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserListing};
use crate::error::UsersServiceError;

/// SeaORM-backed user repository.
#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_one(&self, query: &UserQuery) -> Result<Option<User>, UsersServiceError> {
        let model = apply_filters(users::Entity::find(), &query.filters)
            .one(&self.db)
            .await
            .context("find one user")?;
        Ok(model.map(user_from_model))
    }

    async fn find_many(&self, query: &UserQuery) -> Result<UserListing, UsersServiceError> {
        let select = apply_filters(users::Entity::find(), &query.filters)
            .order_by_asc(users::Column::CreatedAt);

        match query.page {
            Some(page) => {
                let page = page.clamped();
                let total = select
                    .clone()
                    .count(&self.db)
                    .await
                    .context("count users")?;
                let models = select
                    .offset(page.offset())
                    .limit(page.per_page as u64)
                    .all(&self.db)
                    .await
                    .context("list users page")?;
                Ok(UserListing::Paged(Page {
                    items: models.into_iter().map(user_from_model).collect(),
                    total,
                    page: page.page,
                    per_page: page.per_page,
                }))
            }
            None => {
                let models = select.all(&self.db).await.context("list users")?;
                Ok(UserListing::Items(
                    models.into_iter().map(user_from_model).collect(),
                ))
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UsersServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<User, UsersServiceError> {
        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            role: Set(user.role.as_u8() as i16),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(user_from_model(model))
    }
}

fn apply_filters(
    mut select: Select<users::Entity>,
    filters: &[UserFilter],
) -> Select<users::Entity> {
    for filter in filters {
        select = match filter {
            UserFilter::Id(id) => select.filter(users::Column::Id.eq(*id)),
            UserFilter::Email(email) => select.filter(users::Column::Email.eq(email.clone())),
            UserFilter::Role(role) => select.filter(users::Column::Role.eq(role.as_u8() as i16)),
        };
    }
    select
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password: model.password,
        // Role bytes outside the known set fall back to the lowest privilege.
        role: UserRole::from_u8(model.role as u8).unwrap_or(UserRole::Common),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
