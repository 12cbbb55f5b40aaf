//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Create infra implementations (HTTP gateways, clock, scheduler) / 创建 infra 层具体实现
//! - ✅ Create the connectivity monitor / 创建网络状态监视器
//! - ✅ Inject all dependencies into the use cases / 将所有依赖注入到用例
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide what happens when the user is signed out
//! - 不判断"如果用户未登录就怎样"
//!
//! ❌ **No configuration validation / 禁止做配置验证**
//! - Config already loaded in config.rs
//! - 配置已在 config.rs 加载
//!
//! ## Architecture Principle / 架构原则
//!
//! > **This is the only place allowed to depend on lb-infra + lb-app simultaneously.**
//! > **这是唯一允许同时依赖 lb-infra 和 lb-app 的地方。**

use std::sync::Arc;

use anyhow::Context;
use lb_app::{AppDeps, HydrateSelection, ListCatalog, OnboardingFlow, SyncEngine};
use lb_core::config::AppConfig;
use lb_infra::{
    ApiClient, HttpCatalogGateway, HttpProfileGateway, HttpSelectionGateway,
    NetworkStatusMonitor, SystemClock, TokioScheduler,
};
use tracing::info;

/// Result of wiring: the port bundle plus the concrete handles the binary
/// still drives (the probe needs the client and the monitor itself).
/// 装配结果：端口集合，以及二进制仍需直接驱动的具体句柄。
pub struct WiredDependencies {
    pub deps: AppDeps,
    pub client: ApiClient,
    pub network: Arc<NetworkStatusMonitor>,
}

/// Build every adapter from `config` and group them as [`AppDeps`].
/// 根据配置创建所有适配器并打包为 [`AppDeps`]。
pub fn wire_dependencies(config: &AppConfig) -> anyhow::Result<WiredDependencies> {
    let client = ApiClient::new(
        &config.api_base_url,
        &config.access_token,
        config.request_timeout(),
    )
    .context("Failed to create API client")?;

    // Optimistic until the first probe says otherwise.
    let network = Arc::new(NetworkStatusMonitor::new(true));

    let deps = AppDeps {
        selection_gateway: Arc::new(HttpSelectionGateway::new(client.clone())),
        profile: Arc::new(HttpProfileGateway::new(client.clone())),
        catalog: Arc::new(HttpCatalogGateway::new(client.clone())),
        network: network.clone(),
        clock: Arc::new(SystemClock),
        scheduler: Arc::new(TokioScheduler),
        retry_policy: config.retry_policy(),
        debounce: config.debounce(),
    };

    info!(
        base_url = client.base_url(),
        signed_in = client.has_credentials(),
        "dependencies wired"
    );

    Ok(WiredDependencies {
        deps,
        client,
        network,
    })
}

/// Use cases sharing one sync engine.
/// 共享同一个同步引擎的用例集合。
pub struct AppServices {
    pub deps: AppDeps,
    pub sync: Arc<SyncEngine>,
    pub flow: OnboardingFlow,
    pub hydrate: HydrateSelection,
    pub catalog: ListCatalog,
}

impl AppServices {
    pub fn new(deps: AppDeps) -> Self {
        let sync = Arc::new(SyncEngine::from_deps(&deps));
        Self {
            flow: OnboardingFlow::new(deps.profile.clone(), sync.clone()),
            hydrate: HydrateSelection::new(deps.selection_gateway.clone(), sync.clone()),
            catalog: ListCatalog::new(deps.catalog.clone()),
            sync,
            deps,
        }
    }
}
