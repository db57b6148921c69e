use crate::routes::prompts;
use crate::routes::status;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "promptstash-server",
    description = "Prompt Save API",
    version = "0.1.0",
    contact(name = "promptstash", url = "https://github.com/promptstash/promptstash")
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(status::StatusApi::openapi());
    root.merge(prompts::PromptsApi::openapi());
    root
}
