use utoipa::OpenApi;
use utoipa::ToSchema;

use models::product::{Model as Product, ProductCreateInput, ProductUpdateInput};

use crate::errors::ErrorBody;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::get,
        crate::routes::products::update,
        crate::routes::products::remove,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            Product,
            ProductCreateInput,
            ProductUpdateInput,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> serde_json::Value {
        serde_json::from_str(&ApiDoc::openapi().to_json().unwrap()).unwrap()
    }

    #[test]
    fn product_schemas_are_registered() {
        let doc = doc();
        let schemas = &doc["components"]["schemas"];
        for name in ["Product", "ProductCreateInput", "ProductUpdateInput", "ErrorBody"] {
            assert!(schemas.get(name).is_some(), "missing schema {name}");
        }
    }

    #[test]
    fn create_input_marks_active_optional() {
        let doc = doc();
        let required: Vec<&str> = doc["components"]["schemas"]["ProductCreateInput"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        for field in ["name", "cost", "price", "stock"] {
            assert!(required.contains(&field), "{field} should be required");
        }
        assert!(!required.contains(&"active"));
    }

    #[test]
    fn product_paths_are_documented() {
        let doc = doc();
        assert!(doc["paths"]["/products"]["get"].is_object());
        assert!(doc["paths"]["/products"]["post"].is_object());
        assert!(doc["paths"]["/products/{id}"]["patch"].is_object());
        assert!(doc["paths"]["/products/{id}"]["delete"].is_object());
    }
}
