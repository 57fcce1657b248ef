//! Unauthenticated routes. The password change proves knowledge of the
//! current password instead of carrying a bearer token.

use actix_web::{HttpResponse, Scope, web};
use uuid::Uuid;
use validator::Validate;

use crate::domain::identity::PasswordChange;
use crate::repository::DieselRepository;
use crate::routes::error::ApiError;
use crate::services::identity as service;

async fn password_change(
    repo: web::Data<DieselRepository>,
    id: web::Path<Uuid>,
    body: web::Json<PasswordChange>,
) -> Result<HttpResponse, ApiError> {
    let change = body.into_inner();
    change.validate()?;
    service::change_password(repo.get_ref(), id.into_inner(), &change)?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn scope() -> Scope {
    web::scope("/public")
        .route("/identities/{id}/password-change", web::put().to(password_change))
}
