//! GraphQL endpoint
//!
//! Standard Axum handler that carries [`PaginationConfig`] into every request,
//! so list resolvers default and cap `limit` the same way.

use async_graphql::{Context, Request, Response, Schema};
use axum::{extract::Extension, Json};

use crate::config::PaginationConfig;

/// Standard GraphQL handler with page size configuration injection
///
/// # Example
///
/// ```rust,no_run
/// use axum::{Extension, Router, routing::post};
/// use obra_graphql::{graphql_handler, PaginationConfig};
/// use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
///
/// struct Query;
///
/// #[Object]
/// impl Query {
///     async fn ping(&self) -> bool {
///         true
///     }
/// }
///
/// let schema = Schema::new(Query, EmptyMutation, EmptySubscription);
/// let app: Router = Router::new()
///     .route("/api/graphql", post(graphql_handler::<Query, EmptyMutation, EmptySubscription>))
///     .layer(Extension(schema))
///     .layer(Extension(PaginationConfig::default()));
/// ```
pub async fn graphql_handler<Query, Mutation, Subscription>(
    Extension(schema): Extension<Schema<Query, Mutation, Subscription>>,
    Extension(config): Extension<PaginationConfig>,
    req: Json<Request>,
) -> Json<Response>
where
    Query: async_graphql::ObjectType + 'static,
    Mutation: async_graphql::ObjectType + 'static,
    Subscription: async_graphql::SubscriptionType + 'static,
{
    let request = req.0.data(config);
    Json(schema.execute(request).await)
}

/// Get the page size configuration from GraphQL context
pub fn pagination_config(ctx: &Context<'_>) -> PaginationConfig {
    ctx.data_opt::<PaginationConfig>()
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{Connection, PaginationInput};
    use crate::source::load_page;
    use crate::source::tests::{gallery, MemorySource, Post};
    use async_graphql::{EmptyMutation, EmptySubscription, ErrorExtensions, Object};
    use serde_json::json;

    struct Query;

    #[Object]
    impl Query {
        async fn new_posts(
            &self,
            ctx: &Context<'_>,
            after: Option<String>,
            limit: Option<i32>,
        ) -> async_graphql::Result<Connection<Post>> {
            let mut source = MemorySource::new(gallery());
            source.counted = true;
            let input = PaginationInput::new(after, limit);
            load_page(&source, &input, &pagination_config(ctx))
                .await
                .map_err(|e| e.extend())
        }
    }

    fn schema() -> Schema<Query, EmptyMutation, EmptySubscription> {
        Schema::new(Query, EmptyMutation, EmptySubscription)
    }

    const PAGE: &str = r#"
        query Page($after: String, $limit: Int) {
            newPosts(after: $after, limit: $limit) {
                totalCount
                edges { cursor node { id } }
                pageInfo { endCursor hasNextPage }
            }
        }
    "#;

    async fn run(after: Option<&str>, limit: Option<i32>, config: PaginationConfig) -> Response {
        let vars = async_graphql::Variables::from_json(json!({ "after": after, "limit": limit }));
        let request = Request::new(PAGE).variables(vars);
        let Json(response) = graphql_handler(Extension(schema()), Extension(config), Json(request)).await;
        response
    }

    #[tokio::test]
    async fn test_connection_wire_shape() {
        let response = run(None, Some(2), PaginationConfig::default()).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let page = &data["newPosts"];
        assert_eq!(page["totalCount"], 7);
        assert_eq!(page["edges"][0]["node"]["id"], "a3");
        assert_eq!(page["edges"][1]["node"]["id"], "a2");
        assert_eq!(page["pageInfo"]["hasNextPage"], true);
        assert_eq!(page["pageInfo"]["endCursor"], page["edges"][1]["cursor"]);
    }

    #[tokio::test]
    async fn test_next_page_follows_end_cursor() {
        let first = run(None, Some(4), PaginationConfig::default()).await;
        let data = first.data.into_json().unwrap();
        let end = data["newPosts"]["pageInfo"]["endCursor"].as_str().unwrap().to_string();

        let second = run(Some(&end), Some(4), PaginationConfig::default()).await;
        let data = second.data.into_json().unwrap();
        let ids: Vec<_> = data["newPosts"]["edges"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["node"]["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["a4", "a6", "a7"]);
        assert_eq!(data["newPosts"]["pageInfo"]["hasNextPage"], false);
    }

    #[tokio::test]
    async fn test_config_caps_limit() {
        let config = PaginationConfig {
            default_limit: 2,
            max_limit: 3,
        };
        let capped = run(None, Some(50), config).await.data.into_json().unwrap();
        assert_eq!(capped["newPosts"]["edges"].as_array().unwrap().len(), 3);

        let defaulted = run(None, None, config).await.data.into_json().unwrap();
        assert_eq!(defaulted["newPosts"]["edges"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_cursor_error_code() {
        let response = run(Some("%%not-a-cursor%%"), None, PaginationConfig::default()).await;
        assert_eq!(response.errors.len(), 1);
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("INVALID_CURSOR"))
        );
    }

    #[tokio::test]
    async fn test_invalid_limit_error_code() {
        let response = run(None, Some(0), PaginationConfig::default()).await;
        let extensions = response.errors[0].extensions.as_ref().unwrap();
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("INVALID_LIMIT"))
        );
    }

    #[test]
    fn test_connection_type_names() {
        let sdl = schema().sdl();
        assert!(sdl.contains("type PostConnection"));
        assert!(sdl.contains("type PostEdge"));
        assert!(sdl.contains("type PageInfo"));
    }
}
