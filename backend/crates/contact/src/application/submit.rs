//! Submit Contact Use Case
//!
//! CAPTCHA, then insert through the restricted pool, then notify the owner.

use std::sync::Arc;

use platform::captcha::CaptchaVerifier;
use platform::mailer::Mailer;

use crate::application::notifier::ContactNotifier;
use crate::domain::entity::NewContact;
use crate::domain::repository::ContactRepository;
use crate::error::{ContactError, ContactResult};

pub struct SubmitContactInput {
    pub contact: NewContact,
    pub captcha_token: Option<String>,
}

pub struct SubmitContactUseCase<R, C, M>
where
    R: ContactRepository,
    C: CaptchaVerifier,
    M: Mailer,
{
    repo: Arc<R>,
    captcha: Arc<C>,
    notifier: ContactNotifier<M>,
}

impl<R, C, M> SubmitContactUseCase<R, C, M>
where
    R: ContactRepository,
    C: CaptchaVerifier,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, captcha: Arc<C>, notifier: ContactNotifier<M>) -> Self {
        Self {
            repo,
            captcha,
            notifier,
        }
    }

    pub async fn execute(&self, input: SubmitContactInput) -> ContactResult<()> {
        let token = input.captcha_token.unwrap_or_default();
        if !self.captcha.verify(&token).await {
            return Err(ContactError::CaptchaFailed);
        }

        self.repo
            .insert(&input.contact)
            .await
            .map_err(ContactError::Create)?;
        tracing::info!("Contact message received");

        self.notifier.notify(&input.contact).await;
        Ok(())
    }
}
