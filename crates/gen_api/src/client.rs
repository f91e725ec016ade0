use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::{Client, Response, StatusCode};

use crate::config::GenApiConfig;
use crate::error::{parse_error_message, GenApiError};
use crate::frames::Frame;
use crate::payload::GenerateRequest;
use crate::sse::FrameStreamParser;
use crate::url::normalize_generate_url;

/// Optional cancellation signal shared across request and stream loops.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Streaming HTTP client for the generation service.
#[derive(Debug)]
pub struct GenApiClient {
    http: Client,
    config: GenApiConfig,
}

impl GenApiClient {
    pub fn new(config: GenApiConfig) -> Result<Self, GenApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = config.user_agent.as_deref() {
            builder = builder.user_agent(user_agent.to_string());
        }
        let http = builder.build().map_err(GenApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GenApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_generate_url(&self.config.base_url)
    }

    /// Post the generation request and classify the response status.
    ///
    /// 429 maps to [`GenApiError::RateLimited`]; any other non-success
    /// status maps to [`GenApiError::Status`] carrying the code and the
    /// extracted body message. No retry is attempted.
    pub async fn send(
        &self,
        request: &GenerateRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Response, GenApiError> {
        if is_cancelled(cancellation) {
            return Err(GenApiError::Cancelled);
        }

        let pending = self.http.post(self.normalized_endpoint()).json(request).send();
        let response = await_or_cancel(pending, cancellation)
            .await?
            .map_err(GenApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = await_or_cancel(response.text(), cancellation)
            .await?
            .unwrap_or_default();
        let message = parse_error_message(status, &body);
        tracing::warn!(status = status.as_u16(), message = %message, "generate request rejected");

        if status == StatusCode::TOO_MANY_REQUESTS {
            Err(GenApiError::RateLimited(message))
        } else {
            Err(GenApiError::Status { status, message })
        }
    }

    /// Consume the response body and deliver decoded frames in wire order.
    ///
    /// Returns `Ok(())` on a `done` frame or end-of-data, whichever comes
    /// first; an `error` frame aborts with [`GenApiError::StreamFailed`].
    /// Cancellation wins every race against other outcomes.
    pub async fn read_frames<F>(
        &self,
        response: Response,
        cancellation: Option<&CancellationSignal>,
        mut on_frame: F,
    ) -> Result<(), GenApiError>
    where
        F: FnMut(Frame),
    {
        let mut bytes = response.bytes_stream();
        let mut parser = FrameStreamParser::default();
        let mut saw_done = false;

        loop {
            let Some(chunk) = await_or_cancel(bytes.next(), cancellation).await? else {
                break;
            };
            if is_cancelled(cancellation) {
                return Err(GenApiError::Cancelled);
            }
            let chunk = chunk.map_err(GenApiError::from)?;
            for frame in parser.feed(&chunk) {
                if saw_done {
                    break;
                }
                saw_done = dispatch_frame(frame, &mut on_frame)?;
            }
            if saw_done {
                break;
            }
        }

        if !saw_done {
            for frame in parser.finish() {
                dispatch_frame(frame, &mut on_frame)?;
            }
        }

        if is_cancelled(cancellation) {
            return Err(GenApiError::Cancelled);
        }

        Ok(())
    }

    /// Send the request and stream decoded frames to `on_frame`.
    pub async fn stream_with_handler<F>(
        &self,
        request: &GenerateRequest,
        cancellation: Option<&CancellationSignal>,
        on_frame: F,
    ) -> Result<(), GenApiError>
    where
        F: FnMut(Frame),
    {
        let response = self.send(request, cancellation).await?;
        self.read_frames(response, cancellation, on_frame).await
    }
}

fn dispatch_frame<F>(frame: Frame, on_frame: &mut F) -> Result<bool, GenApiError>
where
    F: FnMut(Frame),
{
    match frame {
        Frame::Error(message) => Err(GenApiError::StreamFailed(message)),
        Frame::Done => {
            on_frame(Frame::Done);
            Ok(true)
        }
        delta => {
            on_frame(delta);
            Ok(false)
        }
    }
}

fn is_cancelled(cancel: Option<&CancellationSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, GenApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(GenApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(GenApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::dispatch_frame;
    use crate::error::GenApiError;
    use crate::frames::Frame;

    #[test]
    fn dispatch_forwards_deltas_and_flags_done() {
        let mut observed = Vec::new();

        let done = dispatch_frame(Frame::ContentDelta("a".to_string()), &mut |frame| {
            observed.push(frame);
        })
        .expect("delta frames should dispatch");
        assert!(!done);

        let done = dispatch_frame(Frame::Done, &mut |frame| observed.push(frame))
            .expect("done frames should dispatch");
        assert!(done);

        assert_eq!(
            observed,
            vec![Frame::ContentDelta("a".to_string()), Frame::Done]
        );
    }

    #[test]
    fn dispatch_turns_error_frames_into_stream_failure() {
        let result = dispatch_frame(Frame::Error("boom".to_string()), &mut |_frame| {});
        assert!(matches!(result, Err(GenApiError::StreamFailed(message)) if message == "boom"));
    }
}
