use crate::middleware::{AuthMiddleware, AuthUser, CleanJson};
use crate::result::{CreateGroupBody, GroupListResponse, GroupResponse, UpdateGroupBody};
use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};
use biz_service::biz_service::group_service::GroupService;
use biz_service::biz_service::user_service::TokenVerifier;
use common::errors::AppError;
use std::sync::Arc;

/// Every `/groups` route sits behind bearer-token authentication.
pub fn configure(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    cfg.service(
        web::scope("/groups")
            .service(group_list)
            .service(group_create)
            .service(group_show)
            .service(group_update)
            .service(group_delete)
            .wrap(AuthMiddleware::new(verifier)),
    );
}

#[utoipa::path(
    get,
    path = "/groups",
    tag = "Group",
    summary = "List every group",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "All groups", body = GroupListResponse),
        (status = 401, description = "Missing or unknown token")
    )
)]
#[get("")]
pub async fn group_list(_user: AuthUser, group_service: web::Data<GroupService>) -> Result<impl Responder, AppError> {
    let groups = group_service.list_groups().await?;
    Ok(HttpResponse::Ok().json(GroupListResponse::from(groups)))
}

#[utoipa::path(
    get,
    path = "/groups/{id}",
    tag = "Group",
    summary = "Show one group",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Group id")),
    responses(
        (status = 200, description = "The group", body = GroupResponse),
        (status = 401, description = "Missing or unknown token"),
        (status = 404, description = "No such group")
    )
)]
#[get("/{id}")]
pub async fn group_show(
    _user: AuthUser,
    id: web::Path<String>,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    let group = group_service.find_group(&id).await?;
    Ok(HttpResponse::Ok().json(GroupResponse::from(group)))
}

#[utoipa::path(
    post,
    path = "/groups",
    tag = "Group",
    summary = "Create a group owned by the caller",
    security(("bearer" = [])),
    request_body = CreateGroupBody,
    responses(
        (status = 201, description = "Created group", body = GroupResponse),
        (status = 401, description = "Missing or unknown token"),
        (status = 422, description = "Invalid group fields")
    )
)]
#[post("")]
pub async fn group_create(
    user: AuthUser,
    body: web::Json<CreateGroupBody>,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    // owner always comes from the token, never from the body
    let group = group_service.create_group(user.id, body.into_inner().group).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}

#[utoipa::path(
    patch,
    path = "/groups/{id}",
    tag = "Group",
    summary = "Update a group (owner only); empty-string fields are ignored",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Group id")),
    request_body = UpdateGroupBody,
    responses(
        (status = 204, description = "Updated"),
        (status = 401, description = "Missing token or caller is not the owner"),
        (status = 404, description = "No such group"),
        (status = 422, description = "Invalid group fields")
    )
)]
#[patch("/{id}")]
pub async fn group_update(
    user: AuthUser,
    id: web::Path<String>,
    body: CleanJson<UpdateGroupBody>,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    group_service.update_group(&user.id, &id, body.into_inner().group).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    delete,
    path = "/groups/{id}",
    tag = "Group",
    summary = "Delete a group (owner only)",
    security(("bearer" = [])),
    params(("id" = String, Path, description = "Group id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing token or caller is not the owner"),
        (status = 404, description = "No such group")
    )
)]
#[delete("/{id}")]
pub async fn group_delete(
    user: AuthUser,
    id: web::Path<String>,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    group_service.delete_group(&user.id, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
