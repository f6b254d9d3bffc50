use std::future::Future;
use std::pin::Pin;

use screener_core::models::answer::AnswerMap;
use screener_core::models::question::Question;
use screener_core::models::result::ScreeningResult;

use crate::error::ClientError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The two calls a screening session makes against the prediction service.
///
/// Both are safe to retry. Methods return boxed futures for dyn
/// compatibility.
pub trait ScreeningApi: Send + Sync {
    /// `GET /questions`.
    fn fetch_questions(&self) -> BoxFuture<'_, Result<Vec<Question>, ClientError>>;

    /// `POST /predict` with the answer map as the JSON body.
    fn submit_answers<'a>(
        &'a self,
        answers: &'a AnswerMap,
    ) -> BoxFuture<'a, Result<ScreeningResult, ClientError>>;
}
