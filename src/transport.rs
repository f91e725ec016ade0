//! Transport seam between the session machine and the generation service.
//!
//! [`SessionDispatcher`](crate::SessionDispatcher) is synchronous and
//! callback-driven; tests script it with fake transports while
//! [`HttpTransport`] adapts the async `gen_api` client on a private
//! current-thread runtime.

use gen_api::{CancellationSignal, Frame, GenApiClient, GenApiConfig, GenerateRequest};

use crate::error::SessionError;

/// Observations a transport reports while streaming one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamSignal {
    /// The service accepted the request; frames may follow.
    Opened,
    /// One content fragment, in wire order.
    Delta(String),
}

/// Blocking streaming transport for one generation request.
///
/// `stream` returns `Ok(())` only after the service reported completion,
/// [`SessionError::Cancelled`] when the signal was raised mid-flight, and
/// the classified failure otherwise. Implementations must check
/// `cancellation` cooperatively rather than block indefinitely.
pub trait GenerateTransport: Send + Sync {
    fn stream(
        &self,
        request: &GenerateRequest,
        cancellation: &CancellationSignal,
        observe: &mut dyn FnMut(StreamSignal),
    ) -> Result<(), SessionError>;
}

/// Real transport backed by [`GenApiClient`].
pub struct HttpTransport {
    client: GenApiClient,
}

impl HttpTransport {
    pub fn new(config: GenApiConfig) -> Result<Self, SessionError> {
        let client = GenApiClient::new(config)?;
        Ok(Self { client })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        self.client.normalized_endpoint()
    }
}

impl GenerateTransport for HttpTransport {
    fn stream(
        &self,
        request: &GenerateRequest,
        cancellation: &CancellationSignal,
        observe: &mut dyn FnMut(StreamSignal),
    ) -> Result<(), SessionError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| SessionError::Network(error.to_string()))?;

        runtime.block_on(async {
            let response = self.client.send(request, Some(cancellation)).await?;
            observe(StreamSignal::Opened);
            self.client
                .read_frames(response, Some(cancellation), |frame| {
                    if let Frame::ContentDelta(content) = frame {
                        observe(StreamSignal::Delta(content));
                    }
                })
                .await?;
            Ok(())
        })
    }
}
