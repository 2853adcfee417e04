//! Long-lived owner of runtime state: the latest install snapshot, cached
//! access tokens and the listener registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use cw_core::error::{CwError, Result};
use cw_messages::{msg, MESSAGES};
use tracing::{debug, info, warn};

use crate::client::CwctlClient;
use crate::registry::{ListenerKey, ListenerRegistry, UpdateEvent};
use crate::runner::{CliRunner, CommandRunner};
use crate::status::InstallInfo;
use crate::token::AuthToken;
use crate::types::LOCAL_CONNECTION_ID;

pub struct RuntimeManager<R = CliRunner> {
    client: CwctlClient<R>,
    snapshot: RwLock<Arc<InstallInfo>>,
    tokens: Mutex<HashMap<String, AuthToken>>,
    listeners: ListenerRegistry,
}

impl<R: CommandRunner> RuntimeManager<R> {
    /// Starts with an `Unknown` snapshot; call [`refresh`](Self::refresh) to query.
    pub fn new(client: CwctlClient<R>) -> Self {
        let unknown = InstallInfo::unknown(client.expected_version());
        Self {
            client,
            snapshot: RwLock::new(Arc::new(unknown)),
            tokens: Mutex::new(HashMap::new()),
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn client(&self) -> &CwctlClient<R> {
        &self.client
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// The most recent snapshot, without querying cwctl.
    pub fn install_info(&self) -> Arc<InstallInfo> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Query cwctl and replace the snapshot. A failed query yields `Unknown`.
    pub fn refresh(&self) -> Arc<InstallInfo> {
        let info = match self.client.status() {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "failed to query runtime status");
                InstallInfo::unknown(self.client.expected_version())
            }
        };
        let info = Arc::new(info);

        let previous = {
            let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *guard, Arc::clone(&info))
        };

        if *previous != *info {
            debug!(from = %previous.status(), to = %info.status(), "runtime status changed");
            self.listeners.notify(
                &ListenerKey::connection(LOCAL_CONNECTION_ID),
                &UpdateEvent::RuntimeStatusChanged(Arc::clone(&info)),
            );
        }
        info
    }

    pub fn install(&self) -> Result<Arc<InstallInfo>> {
        let tag = self.client.expected_version().to_string();
        self.lifecycle(|client| client.install(&tag))
    }

    pub fn start(&self) -> Result<Arc<InstallInfo>> {
        let tag = self.client.expected_version().to_string();
        self.lifecycle(|client| client.start(&tag))
    }

    pub fn stop(&self) -> Result<Arc<InstallInfo>> {
        self.lifecycle(|client| client.stop_all())
    }

    pub fn remove(&self) -> Result<Arc<InstallInfo>> {
        let tag = self.client.expected_version().to_string();
        self.lifecycle(|client| client.remove(&tag))
    }

    /// Install and start the expected version as needed.
    pub fn ensure_started(&self) -> Result<Arc<InstallInfo>> {
        let mut info = self.refresh();
        if info.is_started() {
            return Ok(info);
        }
        if !info.is_installed() {
            info!(version = self.client.expected_version(), "installing runtime");
            info = self.install()?;
        }
        if !info.is_started() {
            info = self.start()?;
        }
        if info.is_started() {
            Ok(info)
        } else {
            let message = msg!(
                MESSAGES.runtime.status_not_supported,
                version = self.client.expected_version()
            );
            warn!(status = %info.status(), "{}", message);
            Err(CwError::Protocol {
                status: Some(info.status().to_string()),
                message,
            })
        }
    }

    /// Run a lifecycle operation, then refresh whether or not it succeeded.
    fn lifecycle<F>(&self, operation: F) -> Result<Arc<InstallInfo>>
    where
        F: FnOnce(&CwctlClient<R>) -> Result<()>,
    {
        let outcome = operation(&self.client);
        let info = self.refresh();
        outcome.map(|()| info)
    }

    /// A usable token for `conid`, fetching one when none is cached or the
    /// cached one is about to expire.
    pub fn access_token(&self, conid: &str) -> Result<AuthToken> {
        if let Some(token) = self.cached_token(conid) {
            if !token.about_to_expire() {
                return Ok(token);
            }
            debug!(conid, "cached token about to expire");
        }
        self.fetch_token(conid)
    }

    /// Replace the token after it was rejected, unless it was only just issued.
    pub fn refresh_token(&self, conid: &str) -> Result<AuthToken> {
        if let Some(token) = self.cached_token(conid) {
            if token.recently_created() {
                debug!(conid, "token was just issued, not refetching");
                return Ok(token);
            }
        }
        self.fetch_token(conid)
    }

    pub fn invalidate_token(&self, conid: &str) {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(conid);
    }

    fn cached_token(&self, conid: &str) -> Option<AuthToken> {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(conid)
            .cloned()
    }

    fn fetch_token(&self, conid: &str) -> Result<AuthToken> {
        let token = self.client.get_access_token(conid)?;
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(conid.to_string(), token.clone());
        Ok(token)
    }

    /// Store new credentials and drop any token issued for the old ones.
    pub fn update_credentials(&self, conid: &str, username: &str, password: &str) -> Result<()> {
        self.client.update_keyring(conid, username, password)?;
        self.invalidate_token(conid);
        self.connection_changed(conid);
        Ok(())
    }

    pub fn update_connection(
        &self,
        conid: &str,
        label: &str,
        url: &str,
        username: Option<&str>,
    ) -> Result<()> {
        self.client.update_connection(conid, label, url, username)?;
        self.invalidate_token(conid);
        self.connection_changed(conid);
        Ok(())
    }

    pub fn remove_connection(&self, conid: &str) -> Result<()> {
        self.client.remove_connection(conid)?;
        self.invalidate_token(conid);
        self.connection_changed(conid);
        Ok(())
    }

    pub fn remove_project(&self, conid: &str, project_id: &str) -> Result<()> {
        self.client.remove_project(conid, project_id)?;
        self.listeners.notify(
            &ListenerKey::project(conid, project_id),
            &UpdateEvent::ProjectChanged {
                conid: conid.to_string(),
                project_id: project_id.to_string(),
            },
        );
        Ok(())
    }

    /// Tell everything watching `conid`, including its projects.
    pub fn connection_changed(&self, conid: &str) {
        self.listeners.notify_connection(
            conid,
            &UpdateEvent::ConnectionChanged {
                conid: conid.to_string(),
            },
        );
    }
}
