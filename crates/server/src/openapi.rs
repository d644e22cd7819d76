use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// A persisted address as returned by the API.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDoc {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
}

/// Body accepted by create and update. `id` is ignored when present.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressInputDoc {
    pub id: Option<i64>,
    pub name: String,
    pub phone_number: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::addresses::list,
        crate::routes::addresses::get,
        crate::routes::addresses::create,
        crate::routes::addresses::update,
        crate::routes::addresses::delete,
    ),
    components(
        schemas(
            HealthResponse,
            AddressDoc,
            AddressInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;
