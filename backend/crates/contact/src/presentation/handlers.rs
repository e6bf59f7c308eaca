//! HTTP Handlers

use std::sync::Arc;

use auth::{Principal, TokenService};
use axum::Json;
use axum::extract::{FromRef, State};
use chrono::Utc;
use kernel::extract::{IdPath, Valid, ValidQuery};
use kernel::id::markers;
use kernel::pagination::Page;
use kernel::time;
use platform::captcha::CaptchaVerifier;
use platform::mailer::Mailer;

use crate::application::notifier::ContactNotifier;
use crate::application::{
    CONTACT_PAGE_DEFAULTS, ListContactsUseCase, SubmitContactInput, SubmitContactUseCase,
    UpdateContactUseCase,
};
use crate::domain::entity::{ContactFilter, ContactMessage};
use crate::domain::repository::ContactRepository;
use crate::error::ContactResult;
use crate::presentation::dto::{
    ContactListQuery, CreateContactRequest, SuccessResponse, UpdateContactRequest,
};

/// Shared state for contact handlers
pub struct ContactAppState<R, C, M>
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub captcha: Arc<C>,
    pub notifier: ContactNotifier<M>,
    pub tokens: TokenService,
}

impl<R, C, M> Clone for ContactAppState<R, C, M>
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            captcha: Arc::clone(&self.captcha),
            notifier: self.notifier.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R, C, M> FromRef<ContactAppState<R, C, M>> for TokenService
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    fn from_ref(state: &ContactAppState<R, C, M>) -> Self {
        state.tokens.clone()
    }
}

/// POST /contact
pub async fn submit<R, C, M>(
    State(state): State<ContactAppState<R, C, M>>,
    Valid(req): Valid<CreateContactRequest>,
) -> ContactResult<Json<SuccessResponse>>
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = SubmitContactUseCase::new(
        state.repo.clone(),
        state.captcha.clone(),
        state.notifier.clone(),
    );

    let (contact, captcha_token) = req.into_parts();
    use_case
        .execute(SubmitContactInput {
            contact,
            captcha_token,
        })
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// GET /contact
pub async fn list<R, C, M>(
    _principal: Principal,
    State(state): State<ContactAppState<R, C, M>>,
    ValidQuery(query): ValidQuery<ContactListQuery>,
) -> ContactResult<Json<Page<ContactMessage>>>
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let filter = ContactFilter::resolve(
        query.respondido,
        query.start_date.as_deref().and_then(time::parse_start),
        query.end_date.as_deref().and_then(time::parse_end),
        Utc::now(),
    );
    let page = query.page.resolve(CONTACT_PAGE_DEFAULTS);

    let use_case = ListContactsUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(filter, page).await?))
}

/// PATCH /contact/{id}
pub async fn update<R, C, M>(
    _principal: Principal,
    State(state): State<ContactAppState<R, C, M>>,
    IdPath(id): IdPath<markers::Contact>,
    Valid(req): Valid<UpdateContactRequest>,
) -> ContactResult<Json<SuccessResponse>>
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = UpdateContactUseCase::new(state.repo.clone());
    use_case.execute(id, req.respondido).await?;
    Ok(Json(SuccessResponse::ok()))
}
