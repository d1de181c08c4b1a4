use crate::entities::prelude::*;
use crate::entities::{follows, reactions, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Username of the seeded bootstrap account. Must match the default of
/// `[social] bootstrap_username` in the config.
const BOOTSTRAP_USERNAME: &str = "admin";
const BOOTSTRAP_EMAIL: &str = "admin@localhost";

/// Hash the default bootstrap password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"password";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Videos)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Follows)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Reactions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // At most one edge per ordered (follower, followed) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_follows_follower_followed")
                    .table(Follows)
                    .col(follows::Column::FollowerId)
                    .col(follows::Column::FollowedId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One reaction row per (video, user) pair; kind switches in place
        manager
            .create_index(
                Index::create()
                    .name("idx_reactions_video_user")
                    .table(Reactions)
                    .col(reactions::Column::VideoId)
                    .col(reactions::Column::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Seed the bootstrap owner account new registrants auto-follow
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_default_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Username,
                users::Column::Email,
                users::Column::PasswordHash,
                users::Column::Description,
                users::Column::CreatedAt,
                users::Column::UpdatedAt,
            ])
            .values_panic([
                BOOTSTRAP_USERNAME.into(),
                BOOTSTRAP_EMAIL.into(),
                password_hash.into(),
                String::new().into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reactions).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Follows).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Videos).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
