//! The HTML views: listing, detail, search, comments and sharing.

use std::collections::{BTreeMap, HashMap};

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use gazette_core::DomainError;
use gazette_core::domain::{Comment, Post, Tag};
use gazette_core::pagination::PageParam;
use gazette_core::ports::OutgoingMail;
use gazette_shared::{CommentForm, EmailPostForm, SearchForm, errors_map};

use crate::context::{
    CommentView, PaginationView, PostLink, PostView, TagView, base_context, post_views,
};
use crate::middleware::error::{AppError, AppResult};
use crate::state::{AppState, POSTS_PER_PAGE, SIMILAR_POSTS};
use crate::templates;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// No field errors; inserted so templates can always probe `errors.*`.
fn no_errors() -> BTreeMap<String, Vec<String>> {
    BTreeMap::new()
}

/// GET / - paginated listing of published posts.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let page = PageParam::parse(query.get("page").map(String::as_str));
    render_list(&state, None, page).await
}

/// GET /tag/{tag_slug} - listing restricted to one tag.
pub async fn list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let tag_slug = path.into_inner();
    let tag = state
        .tags
        .by_slug(&tag_slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let page = PageParam::parse(query.get("page").map(String::as_str));
    render_list(&state, Some(tag), page).await
}

async fn render_list(
    state: &AppState,
    tag: Option<Tag>,
    page: PageParam,
) -> AppResult<HttpResponse> {
    let page = state
        .posts
        .page_of_published(tag.as_ref().map(|t| t.id), page, POSTS_PER_PAGE)
        .await?;

    let pagination = PaginationView::from(&page);
    let posts = post_views(state, page.items).await?;

    let mut context = base_context(state).await?;
    context.insert("posts", &posts);
    context.insert("pagination", &pagination);
    if let Some(tag) = tag {
        context.insert("tag", &TagView::from(tag));
    }

    Ok(html(templates::render("blog/post/list.html", &context)?))
}

/// GET /{year}/{month}/{day}/{slug} - post detail with comments and
/// similar posts.
pub async fn detail(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String, String)>,
) -> AppResult<HttpResponse> {
    let (year, month, day, slug) = path.into_inner();

    // Non-numeric date segments are just unknown URLs.
    let year: i32 = year.parse().map_err(|_| AppError::NotFound)?;
    let month: u32 = month.parse().map_err(|_| AppError::NotFound)?;
    let day: u32 = day.parse().map_err(|_| AppError::NotFound)?;

    let post = state
        .posts
        .published_by_date_and_slug(year, month, day, &slug)
        .await?
        .ok_or(AppError::NotFound)?;

    let comments: Vec<CommentView> = state
        .comments
        .active_for_post(post.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let tags = state.tags.for_post(post.id).await?;
    let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    let similar: Vec<PostLink> = state
        .posts
        .similar_published(post.id, &tag_ids, SIMILAR_POSTS)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let author_name = state
        .authors
        .find_by_id(post.author_id)
        .await?
        .map(|a| a.name)
        .unwrap_or_default();

    let mut context = base_context(&state).await?;
    context.insert("post", &PostView::new(post, author_name, tags));
    context.insert("comment_count", &comments.len());
    context.insert("comments", &comments);
    context.insert("similar_posts", &similar);
    context.insert("errors", &no_errors());

    Ok(html(templates::render("blog/post/detail.html", &context)?))
}

/// POST /{post_id}/comment - submit a comment on a published post.
///
/// Renders the confirmation fragment on success and the form with field
/// errors otherwise. Nothing is persisted on validation failure.
pub async fn comment(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<CommentForm>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, &path).await?;
    let form = form.into_inner();

    let mut context = base_context(&state).await?;
    context.insert("post", &PostLink::from(post.clone()));

    match form.validate() {
        Ok(()) => {
            let comment = Comment::new(
                post.id,
                form.name.trim().to_string(),
                form.email.trim().to_string(),
                form.body.trim().to_string(),
            );
            let saved = state.comments.save(comment).await?;
            tracing::info!(post_id = %post.id, comment_id = %saved.id, "Comment added");

            context.insert("comment", &CommentView::from(saved));
            context.insert("errors", &no_errors());
        }
        Err(errors) => {
            context.insert("comment", &Option::<CommentView>::None);
            context.insert("form", &form);
            context.insert("errors", &errors_map(&errors));
        }
    }

    Ok(html(templates::render("blog/post/comment.html", &context)?))
}

/// GET /{post_id}/share - the empty share-by-email form.
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, &path).await?;

    let mut context = base_context(&state).await?;
    context.insert("post", &PostLink::from(post));
    context.insert("sent", &false);
    context.insert("errors", &no_errors());

    Ok(html(templates::render("blog/post/share.html", &context)?))
}

/// POST /{post_id}/share - validate and send the recommendation mail.
///
/// A transport failure surfaces as a 500; there is no retry.
pub async fn share_submit(
    state: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<EmailPostForm>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, &path).await?;
    let form = form.into_inner();

    let mut context = base_context(&state).await?;

    let sent = match form.validate() {
        Ok(()) => {
            let post_url = state.site.absolute_url(&post.path());
            let name = form.name.trim();
            let mail = OutgoingMail {
                to: form.to.trim().to_string(),
                subject: format!(
                    "{} ({}) recommends you reading {}",
                    name, form.email, post.title
                ),
                body: format!(
                    "Read {} at {}\n\n{}'s comments: {}",
                    post.title, post_url, name, form.comments
                ),
            };
            state.mailer.send(mail).await?;
            tracing::info!(post_id = %post.id, "Post shared by mail");

            context.insert("errors", &no_errors());
            true
        }
        Err(errors) => {
            context.insert("form", &form);
            context.insert("errors", &errors_map(&errors));
            false
        }
    };

    context.insert("post", &PostLink::from(post));
    context.insert("sent", &sent);

    Ok(html(templates::render("blog/post/share.html", &context)?))
}

/// GET /search - full-text search over published posts.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let mut context = base_context(&state).await?;

    // An absent parameter renders the bare form; a present one is
    // validated and, when non-blank, ranked against the index.
    if let Some(raw) = query.get("query") {
        let form = SearchForm { query: raw.clone() };
        match form.validate() {
            Ok(()) => {
                let results = state
                    .posts
                    .search_published(raw.trim(), &state.search_language)
                    .await?;
                let results = post_views(&state, results).await?;
                context.insert("query", raw);
                context.insert("results", &results);
                context.insert("errors", &no_errors());
            }
            Err(errors) => {
                context.insert("errors", &errors_map(&errors));
            }
        }
        context.insert("form", &form);
    } else {
        context.insert("form", &SearchForm {
            query: String::new(),
        });
        context.insert("errors", &no_errors());
    }

    Ok(html(templates::render("blog/post/search.html", &context)?))
}

/// Resolve a `{post_id}` path segment to a published post. Garbage ids
/// and invisible posts both read as "no such page".
async fn published_post(state: &AppState, raw_id: &str) -> Result<Post, AppError> {
    let post_id = Uuid::parse_str(raw_id).map_err(|_| AppError::NotFound)?;
    let post = state.posts.published_by_id(post_id).await?;
    Ok(post.ok_or(DomainError::NotFound {
        entity_type: "post",
        id: post_id,
    })?)
}
