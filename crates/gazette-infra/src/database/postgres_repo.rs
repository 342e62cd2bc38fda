//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, DbBackend, EntityTrait, JoinType, Order, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select, Statement,
};
use uuid::Uuid;

use gazette_core::domain::{Author, Comment, Post, Tag};
use gazette_core::error::RepoError;
use gazette_core::pagination::{Page, PageParam, Pager};
use gazette_core::ports::{AuthorRepository, CommentRepository, PostRepository, TagRepository};

use super::entity::author::{self, Entity as AuthorEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity, PostStatus};
use super::entity::post_tag;
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::PostgresBaseRepository;

/// Minimum `ts_rank` score for a search hit.
const SEARCH_RANK_FLOOR: f64 = 0.3;

/// PostgreSQL author repository.
pub type PostgresAuthorRepository = PostgresBaseRepository<AuthorEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// Reader-visible posts: published status with a publish timestamp that is
/// not in the future. Every public read goes through this scope.
fn published_scope() -> Select<PostEntity> {
    PostEntity::find()
        .filter(post::Column::Status.eq(PostStatus::Published))
        .filter(post::Column::PublishedAt.lte(Utc::now()))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn published_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let model = published_scope()
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    async fn published_by_date_and_slug(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        // An impossible date can never match a publish timestamp.
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            return Ok(None);
        };
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Days::new(1);

        let model = published_scope()
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::PublishedAt.gte(day_start))
            .filter(post::Column::PublishedAt.lt(day_end))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    async fn page_of_published(
        &self,
        tag_id: Option<Uuid>,
        page: PageParam,
        per_page: u64,
    ) -> Result<Page<Post>, RepoError> {
        let mut query = published_scope();
        if let Some(tag_id) = tag_id {
            query = query
                .join_rev(JoinType::InnerJoin, post_tag::Relation::Post.def())
                .filter(post_tag::Column::TagId.eq(tag_id));
        }

        let paginator = query
            .order_by_desc(post::Column::PublishedAt)
            .paginate(&self.db, per_page);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let pager = Pager::new(total, per_page);
        let number = pager.resolve(page);

        // fetch_page is zero-based; page numbers are one-based.
        let models = paginator
            .fetch_page(number - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(Page {
            items: models.into_iter().map(Into::into).collect(),
            number,
            num_pages: pager.num_pages(),
            total,
            per_page,
        })
    }

    async fn similar_published(
        &self,
        post_id: Uuid,
        tag_ids: &[Uuid],
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = published_scope()
            .filter(post::Column::Id.ne(post_id))
            .join_rev(JoinType::InnerJoin, post_tag::Relation::Post.def())
            .filter(post_tag::Column::TagId.is_in(tag_ids.iter().copied()))
            .group_by(post::Column::Id)
            .order_by(Expr::cust("COUNT(\"post_tags\".\"tag_id\")"), Order::Desc)
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn search_published(
        &self,
        query: &str,
        language: &str,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%language, "Running full-text search");

        // Title matches weigh more than body matches (weights A and B).
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"SELECT "posts".*
            FROM "posts"
            CROSS JOIN LATERAL (
                SELECT setweight(to_tsvector($1::regconfig, "posts"."title"), 'A')
                    || setweight(to_tsvector($1::regconfig, "posts"."body"), 'B') AS document
            ) AS search
            CROSS JOIN LATERAL (
                SELECT ts_rank(search.document, plainto_tsquery($1::regconfig, $2)) AS rank
            ) AS ranking
            WHERE "posts"."status" = $3
                AND "posts"."published_at" <= $4
                AND search.document @@ plainto_tsquery($1::regconfig, $2)
                AND ranking.rank >= $5
            ORDER BY ranking.rank DESC"#,
            [
                language.into(),
                query.into(),
                PostStatus::Published.to_value().into(),
                Utc::now().into(),
                SEARCH_RANK_FLOOR.into(),
            ],
        );

        let models = PostEntity::find()
            .from_raw_sql(statement)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn latest_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let models = published_scope()
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn all_published(&self) -> Result<Vec<Post>, RepoError> {
        let models = published_scope()
            .order_by_desc(post::Column::PublishedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count_published(&self) -> Result<u64, RepoError> {
        published_scope()
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn most_commented_published(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        // LEFT JOIN keeps posts with zero comments in the ranking.
        let models = published_scope()
            .join_rev(JoinType::LeftJoin, comment::Relation::Post.def())
            .group_by(post::Column::Id)
            .order_by(Expr::cust("COUNT(\"comments\".\"id\")"), Order::Desc)
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let models = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let model = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.map(Into::into))
    }

    async fn for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let models = TagEntity::find()
            .join_rev(JoinType::InnerJoin, post_tag::Relation::Tag.def())
            .filter(post_tag::Column::PostId.eq(post_id))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn for_posts(&self, post_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = post_tag::Entity::find()
            .find_also_related(TagEntity)
            .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let mut tags_by_post: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (link, tag) in rows {
            if let Some(tag) = tag {
                tags_by_post.entry(link.post_id).or_default().push(tag.into());
            }
        }

        Ok(tags_by_post)
    }
}

#[async_trait]
impl AuthorRepository for PostgresAuthorRepository {
    async fn by_ids(&self, ids: &[Uuid]) -> Result<Vec<Author>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = AuthorEntity::find()
            .filter(author::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
