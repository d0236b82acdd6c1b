use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::composer::ResolutionError;
use super::document::Document;
use super::export::{
    export_with_fallback, DocumentExporter, ExportError, ExportReceipt, HtmlFileExporter,
    TextFileExporter,
};
use super::form::FormEvent;
use super::session::{DeclarationSession, SessionSnapshot};
use crate::registry::ReferenceRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error raised by the declaration service.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationServiceError {
    #[error("declaration session '{0}' not found")]
    SessionNotFound(SessionId),
    #[error("declaration session store is unavailable")]
    StoreUnavailable,
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// In-memory session store composing the registry with the export paths.
///
/// Each session has one logical writer; the store lock is never held while an
/// exporter runs, so a second export request observes the generating flag.
pub struct DeclarationService {
    registry: Arc<dyn ReferenceRegistry>,
    primary: Arc<dyn DocumentExporter>,
    fallback: Arc<dyn DocumentExporter>,
    sessions: Mutex<HashMap<SessionId, DeclarationSession>>,
    sequence: AtomicU64,
}

impl DeclarationService {
    pub fn new(
        registry: Arc<dyn ReferenceRegistry>,
        primary: Arc<dyn DocumentExporter>,
        fallback: Arc<dyn DocumentExporter>,
    ) -> Self {
        Self {
            registry,
            primary,
            fallback,
            sessions: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }

    /// HTML export with a plain-text fallback, both writing into `output_dir`.
    pub fn with_output_dir(registry: Arc<dyn ReferenceRegistry>, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        Self::new(
            registry,
            Arc::new(HtmlFileExporter::new(output_dir.clone())),
            Arc::new(TextFileExporter::new(output_dir)),
        )
    }

    pub fn registry(&self) -> &dyn ReferenceRegistry {
        self.registry.as_ref()
    }

    fn next_session_id(&self) -> SessionId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        SessionId(format!("decl-{id:06}"))
    }

    fn sessions(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<SessionId, DeclarationSession>>, DeclarationServiceError>
    {
        self.sessions
            .lock()
            .map_err(|_| DeclarationServiceError::StoreUnavailable)
    }

    fn with_session<T>(
        &self,
        id: &SessionId,
        action: impl FnOnce(&mut DeclarationSession) -> T,
    ) -> Result<T, DeclarationServiceError> {
        let mut sessions = self.sessions()?;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| DeclarationServiceError::SessionNotFound(id.clone()))?;
        Ok(action(session))
    }

    /// Open a session dated today.
    pub fn create(&self) -> Result<(SessionId, SessionSnapshot), DeclarationServiceError> {
        self.create_on(Local::now().date_naive())
    }

    pub fn create_on(
        &self,
        today: NaiveDate,
    ) -> Result<(SessionId, SessionSnapshot), DeclarationServiceError> {
        let session = DeclarationSession::new(self.registry.clone(), today);
        let snapshot = session.snapshot();
        let id = self.next_session_id();
        self.sessions()?.insert(id.clone(), session);
        info!(session = %id, "declaration session opened");
        Ok((id, snapshot))
    }

    pub fn snapshot(&self, id: &SessionId) -> Result<SessionSnapshot, DeclarationServiceError> {
        self.with_session(id, |session| session.snapshot())
    }

    /// Apply events in order; each one completes its recompute before the next.
    pub fn apply(
        &self,
        id: &SessionId,
        events: Vec<FormEvent>,
    ) -> Result<SessionSnapshot, DeclarationServiceError> {
        self.with_session(id, |session| {
            for event in events {
                session.apply(event);
            }
            session.snapshot()
        })
    }

    pub fn document(&self, id: &SessionId) -> Result<Document, DeclarationServiceError> {
        let document = self.with_session(id, |session| session.document())??;
        Ok(document)
    }

    pub fn export(&self, id: &SessionId) -> Result<ExportReceipt, DeclarationServiceError> {
        let request = self.with_session(id, |session| session.begin_export())??;
        let outcome = export_with_fallback(&request, self.primary.as_ref(), self.fallback.as_ref());

        // the session may have been discarded while the exporter ran
        if let Err(error) = self.with_session(id, |session| session.finish_export(&outcome)) {
            info!(session = %id, %error, "export finished for a closed session");
        }

        Ok(outcome?)
    }

    pub fn discard(&self, id: &SessionId) -> Result<(), DeclarationServiceError> {
        self.sessions()?
            .remove(id)
            .map(|_| info!(session = %id, "declaration session closed"))
            .ok_or_else(|| DeclarationServiceError::SessionNotFound(id.clone()))
    }

    pub fn session_count(&self) -> Result<usize, DeclarationServiceError> {
        Ok(self.sessions()?.len())
    }
}

impl fmt::Debug for DeclarationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclarationService")
            .field("primary", &self.primary)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
