//! # Mock Session
//!
//! Utilities for testing presentation code against a [`SessionClient`] without a
//! real session behind it.
//!
//! Use [`MockSession`] to script responses in order, or [`create_mock_client`]
//! with [`expect_request`] to answer each request by hand.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::{Response, SessionClient, SessionRequest};
use crate::session::{SessionError, SessionView};

/// Which command a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    BeginCreate,
    BeginEdit,
    SetField,
    CancelEdit,
    Commit,
    Delete,
    Flush,
    View,
}

impl SessionRequest {
    /// Splits a view-returning request into its kind and responder.
    ///
    /// Returns `Err(self)` for requests with a different response type.
    pub fn into_parts(self) -> Result<(RequestKind, Response), SessionRequest> {
        match self {
            SessionRequest::BeginCreate { respond_to } => Ok((RequestKind::BeginCreate, respond_to)),
            SessionRequest::BeginEdit { respond_to, .. } => Ok((RequestKind::BeginEdit, respond_to)),
            SessionRequest::SetField { respond_to, .. } => Ok((RequestKind::SetField, respond_to)),
            SessionRequest::CancelEdit { respond_to } => Ok((RequestKind::CancelEdit, respond_to)),
            SessionRequest::Commit { respond_to } => Ok((RequestKind::Commit, respond_to)),
            SessionRequest::Delete { respond_to, .. } => Ok((RequestKind::Delete, respond_to)),
            SessionRequest::Flush { respond_to } => Ok((RequestKind::Flush, respond_to)),
            SessionRequest::View { respond_to } => Ok((RequestKind::View, respond_to)),
            other @ SessionRequest::LoadWarning { .. } => Err(other),
        }
    }
}

struct Expectation {
    kind: RequestKind,
    response: Result<SessionView, SessionError>,
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted stand-in for a running session.
///
/// # Example
/// ```ignore
/// let mut mock = MockSession::new();
/// mock.expect(RequestKind::Delete).return_ok(empty_view);
///
/// let client = mock.client();
/// // Drive presentation code with the client...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockSession {
    client: SessionClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSession {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<SessionRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let queued = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let (kind, respond_to) = match request.into_parts() {
                    Ok(parts) => parts,
                    Err(SessionRequest::LoadWarning { respond_to }) => {
                        let _ = respond_to.send(None);
                        continue;
                    }
                    Err(other) => panic!("Unexpected request: {other:?}"),
                };

                let expectation = queued
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();
                match expectation {
                    Some(exp) if exp.kind == kind => {
                        let _ = respond_to.send(exp.response);
                    }
                    Some(exp) => panic!("Expected {:?} request, got {:?}", exp.kind, kind),
                    None => panic!("Unexpected {kind:?} request"),
                }
            }
        });

        Self {
            client: SessionClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> SessionClient {
        self.client.clone()
    }

    /// Expects the next request to be of `kind`.
    pub fn expect(&mut self, kind: RequestKind) -> ExpectationBuilder {
        ExpectationBuilder {
            kind,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder returned by [`MockSession::expect`].
pub struct ExpectationBuilder {
    kind: RequestKind,
    expectations: Expectations,
}

impl ExpectationBuilder {
    pub fn return_ok(self, view: SessionView) {
        self.push(Ok(view));
    }

    pub fn return_err(self, error: SessionError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<SessionView, SessionError>) {
        self.expectations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(Expectation {
                kind: self.kind,
                response,
            });
    }
}

/// Creates a client and the receiver its requests arrive on.
pub fn create_mock_client(buffer_size: usize) -> (SessionClient, mpsc::Receiver<SessionRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SessionClient::new(sender), receiver)
}

/// Waits for the next request and splits it, or `None` if the channel closed
/// or the request does not return a view.
pub async fn expect_request(
    receiver: &mut mpsc::Receiver<SessionRequest>,
) -> Option<(RequestKind, Response)> {
    receiver.recv().await?.into_parts().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    fn idle() -> SessionView {
        SessionView {
            products: Vec::new(),
            state: SessionState::Idle,
            draft: None,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let task = tokio::spawn(async move { client.delete("p1").await });

        let (kind, responder) = expect_request(&mut receiver)
            .await
            .expect("Expected a request");
        assert_eq!(kind, RequestKind::Delete);
        responder.send(Ok(idle())).unwrap();

        assert_eq!(task.await.unwrap(), Ok(idle()));
    }

    #[tokio::test]
    async fn test_mock_session_with_expectations() {
        let mut mock = MockSession::new();
        mock.expect(RequestKind::BeginEdit)
            .return_err(SessionError::NotFound("p9".into()));
        mock.expect(RequestKind::View).return_ok(idle());

        let client = mock.client();
        assert_eq!(
            client.begin_edit("p9").await.unwrap_err(),
            SessionError::NotFound("p9".into())
        );
        assert_eq!(client.view().await.unwrap(), idle());
        assert_eq!(client.load_warning().await.unwrap(), None);

        mock.verify();
    }
}
