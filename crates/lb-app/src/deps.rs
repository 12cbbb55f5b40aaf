//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping for use case construction.
//! 此模块定义用例构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;
use std::time::Duration;

use lb_core::ports::*;
use lb_core::RetryPolicy;

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
#[derive(Clone)]
pub struct AppDeps {
    // Persistence gateway dependencies / 持久化网关依赖
    pub selection_gateway: Arc<dyn SelectionGatewayPort>,
    pub profile: Arc<dyn ProfilePort>,
    pub catalog: Arc<dyn CatalogPort>,

    // Network dependencies / 网络依赖
    pub network: Arc<dyn NetworkStatusPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
    pub scheduler: Arc<dyn SchedulerPort>,

    // Sync tuning / 同步参数
    pub retry_policy: RetryPolicy,
    pub debounce: Duration,
}
