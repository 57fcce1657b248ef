//! Script endpoint, including the raw body download.

use actix_web::{HttpResponse, Scope, web};
use uuid::Uuid;

use crate::auth::{AuthenticatedUser, ResourceGroup};
use crate::domain::ResourceOption;
use crate::domain::script::{NewScript, PatchScript, Script, ScriptCategory, UpdateScript};
use crate::repository::{DieselRepository, ScriptFilter};
use crate::routes::error::ApiError;
use crate::routes::query::QueryParams;
use crate::routes::resource::{ReadRestResource, WriteRestResource, crud_routes};
use crate::services::ServiceResult;
use crate::services::script as service;

pub struct Scripts;

impl ReadRestResource for Scripts {
    type Dto = Script;
    type Filter = ScriptFilter;

    const GROUP: ResourceGroup = ResourceGroup::Script;

    fn to_filter(_repo: &DieselRepository, query: &QueryParams) -> Result<Self::Filter, ApiError> {
        let mut filter = ScriptFilter::new();
        if let Some(text) = query.get("text") {
            filter = filter.text(text);
        }
        if let Some(code) = query.get("code") {
            filter = filter.code(code);
        }
        if let Some(category) = query.parse::<ScriptCategory>("category")? {
            filter = filter.category(category);
        }
        let page = query.page_request()?;
        Ok(filter.paginate(page.page, page.size))
    }

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<Self::Dto>)> {
        service::list_scripts(repo, user, filter)
    }

    fn autocomplete(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        filter: Self::Filter,
    ) -> ServiceResult<(usize, Vec<ResourceOption>)> {
        let (total, items) = service::autocomplete_scripts(repo, user, filter)?;
        let options = items
            .into_iter()
            .map(|s| ResourceOption {
                id: s.id,
                label: s.name,
            })
            .collect();
        Ok((total, options))
    }

    fn get(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
    ) -> ServiceResult<Self::Dto> {
        service::get_script(repo, user, id)
    }
}

impl WriteRestResource for Scripts {
    type Create = NewScript;
    type Replace = UpdateScript;
    type Patch = PatchScript;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        body: Self::Create,
    ) -> ServiceResult<Self::Dto> {
        service::create_script(repo, user, body)
    }

    fn replace(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Replace,
    ) -> ServiceResult<Self::Dto> {
        service::update_script(repo, user, id, body)
    }

    fn patch(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: Uuid,
        body: Self::Patch,
    ) -> ServiceResult<Self::Dto> {
        service::patch_script(repo, user, id, body)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: Uuid) -> ServiceResult<()> {
        service::delete_script(repo, user, id)
    }
}

async fn file(
    repo: web::Data<DieselRepository>,
    user: AuthenticatedUser,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let (filename, body) = service::script_file(repo.get_ref(), &user, id.into_inner())?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body))
}

pub fn scope() -> Scope {
    crud_routes::<Scripts>("/scripts").route("/{id}/file", web::get().to(file))
}
