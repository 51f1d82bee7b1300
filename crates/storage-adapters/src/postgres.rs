//! Postgres implementations of the repository ports (feature `db-postgres`).
//!
//! Rows are mapped by hand so the SQL shape stays visible; the dynamic
//! search condition is rendered with `QueryBuilder`, mirroring the rules of
//! `PostSearchCondition::matches` exactly.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, QueryBuilder, Row};
use std::str::FromStr;

use domains::{
    BoardError, Comment, CommentRepo, NewComment, NewPost, NewUser, Page, PageRequest, Post,
    PostRepo, PostSearchCondition, Result, SearchScope, SortDirection, User, UserRepo, UserRole,
};

pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    tracing::info!("applying database migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn db_err(err: sqlx::Error) -> BoardError {
    BoardError::storage(err)
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub struct PgUserRepo {
    pool: PgPool,
}

impl PgUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &PgRow) -> Result<User> {
    let role: String = row.get("role");
    let role = UserRole::from_str(&role).map_err(|msg| BoardError::storage(anyhow::anyhow!(msg)))?;
    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role,
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO users (email, password_hash, role, created_at) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            // the unique index on email races ahead of any pre-check
            if is_unique_violation(&err) {
                BoardError::DuplicateEmail
            } else {
                db_err(err)
            }
        })?;
        Ok(User {
            id: row.get("id"),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: now,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        row.as_ref().map(row_to_user).transpose()
    }
}

pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: &PgRow) -> Post {
    Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Appends the WHERE clause for a search condition. Same rules as
/// `PostSearchCondition::matches`: trimmed lowercase substring per scope,
/// inclusive timestamp bounds, all ANDed.
fn push_condition(qb: &mut QueryBuilder<'_, Postgres>, condition: &PostSearchCondition) {
    fn sep(qb: &mut QueryBuilder<'_, Postgres>, first: &mut bool) {
        qb.push(if *first { " WHERE " } else { " AND " });
        *first = false;
    }
    let mut first = true;

    if let Some(keyword) = condition.keyword() {
        let like = format!("%{}%", keyword.to_lowercase());
        sep(qb, &mut first);
        match condition.scope {
            SearchScope::Title => {
                qb.push("lower(title) LIKE ");
                qb.push_bind(like);
            }
            SearchScope::Content => {
                qb.push("lower(content) LIKE ");
                qb.push_bind(like);
            }
            SearchScope::TitleContent => {
                qb.push("(lower(title) LIKE ");
                qb.push_bind(like.clone());
                qb.push(" OR lower(content) LIKE ");
                qb.push_bind(like);
                qb.push(")");
            }
        }
    }
    if let Some(from) = condition.created_from {
        sep(qb, &mut first);
        qb.push("created_at >= ");
        qb.push_bind(from);
    }
    if let Some(to) = condition.created_to {
        sep(qb, &mut first);
        qb.push("created_at <= ");
        qb.push_bind(to);
    }
}

fn order_clause(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => " ORDER BY created_at ASC, id ASC",
        SortDirection::Desc => " ORDER BY created_at DESC, id DESC",
    }
}

#[async_trait]
impl PostRepo for PgPostRepo {
    async fn insert(&self, post: NewPost) -> Result<Post> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO posts (title, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) RETURNING id",
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(Post {
            id: row.get("id"),
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, title, content, created_at, updated_at FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_post))
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn update(&self, post: &Post) -> Result<()> {
        sqlx::query("UPDATE posts SET title = $1, content = $2, updated_at = $3 WHERE id = $4")
            .bind(&post.title)
            .bind(&post.content)
            .bind(Utc::now())
            .bind(post.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn search(
        &self,
        condition: &PostSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<Post>> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_condition(&mut count_query, condition);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let mut select = QueryBuilder::new(
            "SELECT id, title, content, created_at, updated_at FROM posts",
        );
        push_condition(&mut select, condition);
        select.push(order_clause(page.direction));
        select.push(" LIMIT ");
        select.push_bind(i64::from(page.size));
        select.push(" OFFSET ");
        select.push_bind(page.offset() as i64);

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let content = rows.iter().map(row_to_post).collect();
        Ok(Page::new(content, total as u64, page))
    }
}

pub struct PgCommentRepo {
    pool: PgPool,
}

impl PgCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_comment(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        post_id: row.get("post_id"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl CommentRepo for PgCommentRepo {
    async fn insert(&self, comment: NewComment) -> Result<Comment> {
        let now = Utc::now();
        let row = sqlx::query(
            "INSERT INTO comments (post_id, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) RETURNING id",
        )
        .bind(comment.post_id)
        .bind(&comment.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(Comment {
            id: row.get("id"),
            post_id: comment.post_id,
            content: comment.content,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, post_id, content, created_at, updated_at FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.as_ref().map(row_to_comment))
    }

    async fn exists_in_post(&self, id: i64, post_id: i64) -> Result<bool> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1 AND post_id = $2)")
            .bind(id)
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        sqlx::query("UPDATE comments SET content = $1, updated_at = $2 WHERE id = $3")
            .bind(&comment.content)
            .bind(Utc::now())
            .bind(comment.id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_in_post(&self, id: i64, post_id: i64) -> Result<()> {
        sqlx::query("DELETE FROM comments WHERE id = $1 AND post_id = $2")
            .bind(id)
            .bind(post_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn page_for_post(&self, post_id: i64, page: &PageRequest) -> Result<Page<Comment>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let sql = format!(
            "SELECT id, post_id, content, created_at, updated_at FROM comments \
             WHERE post_id = $1{} LIMIT $2 OFFSET $3",
            order_clause(page.direction)
        );
        let rows = sqlx::query(&sql)
            .bind(post_id)
            .bind(i64::from(page.size))
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let content = rows.iter().map(row_to_comment).collect();
        Ok(Page::new(content, total as u64, page))
    }
}
