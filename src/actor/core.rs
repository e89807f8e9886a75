//! # Session Actor
//!
//! Runs a [`ProductSession`] inside its own Tokio task.
//!
//! ## Key Types
//!
//! - [`SessionRequest`]: one message per session command.
//! - [`SessionActor`]: owns the session and drains the channel.
//! - [`SessionClient`]: cloneable handle the presentation layer talks to.
//!
//! The actor handles one request to completion (validate, mutate, persist,
//! respond) before reading the next, so the session needs no locking even when
//! several clients share it.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::model::DraftField;
use crate::session::{ProductSession, SessionError, SessionView};
use crate::store::{CorruptStateWarning, ProductStore};

/// One-shot channel carrying a command's outcome back to the client.
pub type Response = oneshot::Sender<Result<SessionView, SessionError>>;

/// Message sent to the actor. Variants map 1:1 to session commands.
#[derive(Debug)]
pub enum SessionRequest {
    BeginCreate {
        respond_to: Response,
    },
    BeginEdit {
        id: String,
        respond_to: Response,
    },
    SetField {
        field: DraftField,
        value: String,
        respond_to: Response,
    },
    CancelEdit {
        respond_to: Response,
    },
    Commit {
        respond_to: Response,
    },
    Delete {
        id: String,
        respond_to: Response,
    },
    Flush {
        respond_to: Response,
    },
    View {
        respond_to: Response,
    },
    LoadWarning {
        respond_to: oneshot::Sender<Option<CorruptStateWarning>>,
    },
}

/// Owns the session and the receiving end of the channel.
pub struct SessionActor<S: ProductStore> {
    receiver: mpsc::Receiver<SessionRequest>,
    session: ProductSession<S>,
}

impl<S: ProductStore + Send + 'static> SessionActor<S> {
    pub fn new(buffer_size: usize, session: ProductSession<S>) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, session };
        (actor, SessionClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(size = self.session.products().len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            let (result, respond_to) = match msg {
                SessionRequest::BeginCreate { respond_to } => {
                    (Ok(self.session.begin_create()), respond_to)
                }
                SessionRequest::BeginEdit { id, respond_to } => {
                    (self.session.begin_edit(&id), respond_to)
                }
                SessionRequest::SetField {
                    field,
                    value,
                    respond_to,
                } => (self.session.update_draft_field(field, value), respond_to),
                SessionRequest::CancelEdit { respond_to } => {
                    (Ok(self.session.cancel_edit()), respond_to)
                }
                SessionRequest::Commit { respond_to } => (self.session.commit(), respond_to),
                SessionRequest::Delete { id, respond_to } => {
                    (self.session.delete(&id), respond_to)
                }
                SessionRequest::Flush { respond_to } => (self.session.flush(), respond_to),
                SessionRequest::View { respond_to } => (Ok(self.session.view()), respond_to),
                SessionRequest::LoadWarning { respond_to } => {
                    let _ = respond_to.send(self.session.load_warning().cloned());
                    continue;
                }
            };

            if respond_to.send(result).is_err() {
                debug!("Client went away before the response");
            }
        }

        if self.session.is_dirty() {
            warn!(size = self.session.products().len(), "Shutdown with unsaved changes");
        }
        info!(size = self.session.products().len(), "Shutdown");
    }
}

/// A cloneable handle for issuing commands to a [`SessionActor`].
#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    async fn request(
        &self,
        make: impl FnOnce(Response) -> SessionRequest,
    ) -> Result<SessionView, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn begin_create(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| SessionRequest::BeginCreate { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn begin_edit(&self, id: &str) -> Result<SessionView, SessionError> {
        let id = id.to_string();
        self.request(|respond_to| SessionRequest::BeginEdit { id, respond_to })
            .await
    }

    #[instrument(skip(self, value))]
    pub async fn set_field(
        &self,
        field: DraftField,
        value: impl Into<String>,
    ) -> Result<SessionView, SessionError> {
        let value = value.into();
        self.request(|respond_to| SessionRequest::SetField {
            field,
            value,
            respond_to,
        })
        .await
    }

    /// Like [`set_field`](Self::set_field), addressing the field by its form name.
    #[instrument(skip(self, value))]
    pub async fn set_field_named(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<SessionView, SessionError> {
        let field: DraftField = name.parse()?;
        self.set_field(field, value).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_edit(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| SessionRequest::CancelEdit { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn commit(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| SessionRequest::Commit { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<SessionView, SessionError> {
        let id = id.to_string();
        self.request(|respond_to| SessionRequest::Delete { id, respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn flush(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| SessionRequest::Flush { respond_to })
            .await
    }

    #[instrument(skip(self))]
    pub async fn view(&self) -> Result<SessionView, SessionError> {
        self.request(|respond_to| SessionRequest::View { respond_to })
            .await
    }

    /// The warning raised when the session was opened over an unreadable blob.
    #[instrument(skip(self))]
    pub async fn load_warning(&self) -> Result<Option<CorruptStateWarning>, SessionError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::LoadWarning { respond_to })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)
    }
}
