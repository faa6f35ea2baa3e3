use utoipa::{Modify, OpenApi};

use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        uploads_handlers::get_node_definition,
        uploads_handlers::execute_node,
    ),
    components(
        schemas(
            uploads_dtos::ExecuteNodeDto,
            uploads_dtos::UploadResultDto,
            uploads_dtos::NodeDefinitionDto,
            uploads_dtos::NodeInputDto,
            uploads_dtos::NodeInputKind,
            ApiResponse<uploads_dtos::UploadResultDto>,
            ApiResponse<uploads_dtos::NodeDefinitionDto>,
        )
    ),
    tags(
        (name = "node", description = "R2 upload node: descriptor and execution"),
    ),
    info(
        title = "R2 Upload Node API",
        version = "0.1.0",
        description = "Uploads generated images and their prompt metadata to an R2 bucket",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
