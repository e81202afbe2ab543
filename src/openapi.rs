use crate::error::ApiErrorBody;
use crate::models::SignInRequest;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::sign_in,
        crate::routes::proxy_graphql,
    ),
    components(schemas(SignInRequest, ApiErrorBody)),
    tags(
        (name = "relay", description = "Pass-through to the auth and GraphQL upstreams"),
    )
)]
pub struct ApiDoc;
