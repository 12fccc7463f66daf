//! `RecordsApi` over the browser's fetch, through `gloo-net`.
//!
//! Every call:
//! - is addressed relative to `ClientConfig::api_base`,
//! - carries `Authorization: Bearer <token>` when the sign-in screen left a
//!   token in session or local storage,
//! - races a timer when `request_timeout_ms` is configured.

use std::future::Future;

use common::model::config::ClientConfig;
use common::model::record::{decode_detail, decode_pool, DecodeError, EligibleRecord, RecordDetail};
use common::model::upload::PoolKind;
use common::requests::{FormPart, ServerReply, SubmissionRequest};
use futures_util::future::{select, Either};
use futures_util::pin_mut;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use uuid::Uuid;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use super::{FetchError, RecordsApi, SubmissionError, SubmissionReceipt};

pub struct HttpRecordsApi {
    config: ClientConfig,
}

impl HttpRecordsApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn bearer_token(&self) -> Option<String> {
        let window = web_sys::window()?;
        let key = &self.config.token_storage_key;
        [window.session_storage(), window.local_storage()]
            .into_iter()
            .filter_map(|storage| storage.ok().flatten())
            .find_map(|storage| storage.get_item(key).ok().flatten())
            .filter(|token| !token.is_empty())
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.bearer_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.config.endpoint(path);
        log::debug!("GET {}", url);

        let exchange = async {
            let response = self
                .authorized(Request::get(&url))
                .send()
                .await
                .map_err(|err| FetchError::Network(err.to_string()))?;

            if response.status() != 200 {
                return Err(FetchError::Status(response.status()));
            }

            response
                .json::<Value>()
                .await
                .map_err(|err| FetchError::Malformed(DecodeError::InvalidJson(err.to_string())))
        };

        within(self.config.request_timeout_ms, exchange)
            .await
            .ok_or(FetchError::Timeout)?
    }
}

impl RecordsApi for HttpRecordsApi {
    type File = web_sys::File;

    async fn pool(&self, kind: PoolKind) -> Result<Vec<EligibleRecord>, FetchError> {
        let body = self.get_json(&format!("pool/{}", kind.path_segment())).await?;
        Ok(decode_pool(&body)?)
    }

    async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError> {
        let encoded = String::from(js_sys::encode_uri_component(id));
        let body = self.get_json(&format!("detail/{}", encoded)).await?;
        Ok(decode_detail(id, &body)?)
    }

    async fn submit(
        &self,
        request: &SubmissionRequest<web_sys::File>,
        attempt: Uuid,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let url = self
            .config
            .endpoint(&format!("submit/{}", request.upload_type.path_segment()));
        log::info!("POST {} attempt={} record={}", url, attempt, request.record_id);

        let form = build_form(request).map_err(|err| {
            SubmissionError::Transport(format!("could not assemble form data: {:?}", err))
        })?;

        let outgoing = self
            .authorized(Request::post(&url))
            .header("X-Request-Id", &attempt.to_string())
            .body(form)
            .map_err(|err| SubmissionError::Transport(err.to_string()))?;

        let exchange = async {
            let response = outgoing
                .send()
                .await
                .map_err(|err| SubmissionError::Transport(err.to_string()))?;
            let status = response.status();
            let accepted = response.ok();
            let body = response.text().await.unwrap_or_default();
            Ok::<_, SubmissionError>((status, accepted, body))
        };

        let (status, accepted, body) = within(self.config.request_timeout_ms, exchange)
            .await
            .ok_or(SubmissionError::Timeout)??;
        let reply = ServerReply::from_body(&body);

        if accepted {
            Ok(SubmissionReceipt {
                status,
                message: reply.reason().map(str::to_string),
            })
        } else {
            Err(SubmissionError::Rejected {
                status,
                message: reply.reason().map(str::to_string),
            })
        }
    }
}

/// One part per scalar field, one part per attached file.
fn build_form(request: &SubmissionRequest<web_sys::File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for part in request.parts() {
        match part {
            FormPart::Text { name, value } => form.append_with_str(name, value)?,
            FormPart::File {
                name,
                file_name,
                handle,
            } => form.append_with_blob_and_filename(name, handle, file_name)?,
        }
    }
    Ok(form)
}

/// Resolves to `None` when `timeout_ms` elapses before `future` completes.
/// The whole exchange, body included, has to fit in the window.
async fn within<F: Future>(timeout_ms: Option<u32>, future: F) -> Option<F::Output> {
    match timeout_ms {
        Some(timeout_ms) => race(future, TimeoutFuture::new(timeout_ms)).await,
        None => Some(future.await),
    }
}

/// `Some(output)` when `future` finishes first, `None` when `timer` does.
async fn race<F: Future, T: Future>(future: F, timer: T) -> Option<F::Output> {
    pin_mut!(future);
    pin_mut!(timer);
    match select(future, timer).await {
        Either::Left((output, _)) => Some(output),
        Either::Right(_) => None,
    }
}
