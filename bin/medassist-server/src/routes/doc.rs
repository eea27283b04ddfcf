//! OpenAPI document served next to Swagger UI.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::chat::ChatApi;
use super::health::HealthApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "MedAssist API", description = "Medical question answering backed by a hosted LLM"),
    modifiers(&BearerAuth)
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut spec = ApiDoc::openapi();
    spec.merge(ChatApi::openapi());
    spec.merge(HealthApi::openapi());
    spec
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn docs_cover_chat_and_health() {
        let spec = get_docs();
        assert!(spec.paths.paths.contains_key("/api/chat"));
        assert!(spec.paths.paths.contains_key("/health"));
    }
}
