//! Contact Router

use std::sync::Arc;

use auth::TokenService;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{patch, post},
};
use platform::captcha::{CaptchaVerifier, TurnstileVerifier};
use platform::mailer::{Mailer, ResendMailer};
use platform::rate_limit::{RateLimiter, rate_limit};

use crate::application::notifier::ContactNotifier;
use crate::domain::repository::ContactRepository;
use crate::infra::postgres::PgContactRepository;
use crate::presentation::handlers::{self, ContactAppState};

/// Create the Contact router with PostgreSQL, Turnstile and Resend
pub fn contact_router(
    repo: PgContactRepository,
    captcha: TurnstileVerifier,
    notifier: ContactNotifier<ResendMailer>,
    tokens: TokenService,
    submit_limiter: RateLimiter,
) -> Router {
    contact_router_generic(repo, captcha, notifier, tokens, submit_limiter)
}

/// Create a generic Contact router for any collaborator implementations
pub fn contact_router_generic<R, C, M>(
    repo: R,
    captcha: C,
    notifier: ContactNotifier<M>,
    tokens: TokenService,
    submit_limiter: RateLimiter,
) -> Router
where
    R: ContactRepository + Send + Sync + 'static,
    C: CaptchaVerifier + Send + Sync + 'static,
    M: Mailer + Send + Sync + 'static,
{
    let state = ContactAppState {
        repo: Arc::new(repo),
        captcha: Arc::new(captcha),
        notifier,
        tokens,
    };

    Router::new()
        .route(
            "/",
            post(handlers::submit::<R, C, M>)
                .layer(from_fn_with_state(submit_limiter, rate_limit))
                .get(handlers::list::<R, C, M>),
        )
        .route("/{id}", patch(handlers::update::<R, C, M>))
        .with_state(state)
}
