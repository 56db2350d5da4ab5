use crate::handlers::common_handler::*;
use crate::handlers::group_handler::*;
use crate::result::{CreateGroupBody, GroupListResponse, GroupResponse, UpdateGroupBody};
use actix_web::{HttpResponse, Responder, get, web};
use biz_service::entitys::group_dto::{CreateGroupDto, UpdateGroupDto};
use biz_service::entitys::group_entity::GroupView;
use log::error;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        status,
        // groups
        group_list,
        group_show,
        group_create,
        group_update,
        group_delete,
    ),
    components(schemas(
        GroupView,
        CreateGroupDto,
        UpdateGroupDto,
        CreateGroupBody,
        UpdateGroupBody,
        GroupResponse,
        GroupListResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "Group", description = "Group resource, owner-restricted mutation"),
        (name = "Common", description = "Service endpoints")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("bearer", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/openapi.json")]
async fn openapi_json() -> impl Responder {
    match ApiDoc::openapi().to_json() {
        Ok(body) => HttpResponse::Ok().content_type("application/json").body(body),
        Err(e) => {
            error!("openapi render failed: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
