//! Privilege checks in front of the lifecycle services
//!
//! The core services never check privileges themselves. Hosts that expose
//! them to end users wrap them in the decorators below.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::{
    application::{call_flow_service::CallFlowService, config_service::ConfigService},
    domain::call_flow::{CallFlow, CallFlowId},
    domain::settings::{Config, Renderer},
    CallFlowError,
};

/// A named capability granted to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Privilege(&'static str);

impl Privilege {
    /// Required for every call flow and settings mutation
    pub const MANAGE_CALLFLOWS: Privilege = Privilege("Manage CallFlows");

    /// Name of the privilege
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The authenticated caller and its granted privileges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    user: String,
    privileges: HashSet<String>,
}

impl UserContext {
    /// A caller with no privileges
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            privileges: HashSet::new(),
        }
    }

    /// Grant a privilege by name
    pub fn with_privilege(mut self, privilege: impl Into<String>) -> Self {
        self.privileges.insert(privilege.into());
        self
    }

    /// User name
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Whether the caller holds `privilege`
    pub fn has_privilege(&self, privilege: Privilege) -> bool {
        self.privileges.contains(privilege.name())
    }

    /// Fail with `Unauthorized` unless the caller holds `privilege`
    pub fn require(&self, privilege: Privilege) -> Result<(), CallFlowError> {
        if self.has_privilege(privilege) {
            return Ok(());
        }
        tracing::warn!(user = %self.user, privilege = %privilege, "Privilege check failed");
        Err(CallFlowError::Unauthorized(format!(
            "User {} lacks privilege: {}",
            self.user, privilege
        )))
    }
}

/// [`CallFlowService`] behind privilege checks
#[derive(Debug, Clone)]
pub struct AuthorizedCallFlowService {
    inner: Arc<CallFlowService>,
}

impl AuthorizedCallFlowService {
    /// Wrap `inner`
    pub fn new(inner: Arc<CallFlowService>) -> Self {
        Self { inner }
    }

    /// The unchecked service
    pub fn inner(&self) -> &Arc<CallFlowService> {
        &self.inner
    }

    /// See [`CallFlowService::create`]
    pub async fn create(&self, user: &UserContext, call_flow: CallFlow) -> Result<CallFlow, CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.create(call_flow).await
    }

    /// See [`CallFlowService::update`]
    pub async fn update(&self, user: &UserContext, call_flow: CallFlow) -> Result<CallFlow, CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.update(call_flow).await
    }

    /// See [`CallFlowService::save_call_flow`]
    pub async fn save_call_flow(
        &self,
        user: &UserContext,
        call_flow: CallFlow,
    ) -> Result<CallFlow, CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.save_call_flow(call_flow).await
    }

    /// See [`CallFlowService::delete`]
    pub async fn delete(&self, user: &UserContext, id: CallFlowId) -> Result<(), CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.delete(id).await
    }

    /// See [`CallFlowService::find_all_by_name_prefix`]
    pub async fn find_all_by_name_prefix(
        &self,
        user: &UserContext,
        prefix: &str,
    ) -> Result<Vec<CallFlow>, CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.find_all_by_name_prefix(prefix).await
    }

    /// See [`CallFlowService::find_by_name`]; open to every caller
    pub async fn find_by_name(&self, name: &str) -> Result<CallFlow, CallFlowError> {
        self.inner.find_by_name(name).await
    }
}

/// [`ConfigService`] with privilege checks on mutations
#[derive(Debug, Clone)]
pub struct AuthorizedConfigService {
    inner: Arc<ConfigService>,
}

impl AuthorizedConfigService {
    /// Wrap `inner`
    pub fn new(inner: Arc<ConfigService>) -> Self {
        Self { inner }
    }

    /// The unchecked service, for reads
    pub fn inner(&self) -> &Arc<ConfigService> {
        &self.inner
    }

    /// See [`ConfigService::update_configs`]
    pub async fn update_configs(&self, user: &UserContext, configs: Vec<Config>) -> Result<(), CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.update_configs(configs).await
    }

    /// See [`ConfigService::update_renderers`]
    pub async fn update_renderers(
        &self,
        user: &UserContext,
        renderers: Vec<Renderer>,
    ) -> Result<(), CallFlowError> {
        user.require(Privilege::MANAGE_CALLFLOWS)?;
        self.inner.update_renderers(renderers).await
    }
}
