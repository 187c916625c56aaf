//! Server state
//!
//! 服务器状态 - 持有所有服务的单例引用。使用 Arc 实现浅拷贝，
//! 所有权成本极低。
//!
//! | 字段 | 类型 | 说明 |
//! |------|------|------|
//! | config | Config | 配置项 (不可变) |
//! | db | Surreal<Db> | 嵌入式数据库 |
//! | engine | Arc<WorkflowEngine> | 状态机引擎 |
//! | notifier | Notifier | 通知队列句柄 |

use std::sync::{Arc, Mutex};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::EmailLogRepository;
use crate::notify::{
    EmailDispatcher, HttpEmailDispatcher, MemoryDispatcher, Notifier, NotifyService,
};
use crate::utils::AppError;
use crate::workflow::WorkflowEngine;
use shared::models::EmailMessage;

/// 服务器状态 - 持有所有服务的共享引用
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 状态机引擎
    pub engine: Arc<WorkflowEngine>,
    /// 通知队列句柄
    pub notifier: Notifier,
    /// 通知队列接收端，start_background_tasks 取走后启动 worker
    notify_rx: Arc<Mutex<Option<mpsc::Receiver<EmailMessage>>>>,
    /// 通知派发器 (HTTP sink 或测试用 Memory)
    dispatcher: Arc<dyn EmailDispatcher>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/data)
    /// 3. 通知服务
    /// 4. 工作流引擎
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;
        std::fs::create_dir_all(config.uploads_dir())
            .map_err(|e| AppError::internal(format!("Failed to create uploads dir: {e}")))?;

        let db_service = DbService::open(&config.database_dir()).await?;
        let dispatcher: Arc<dyn EmailDispatcher> =
            Arc::new(HttpEmailDispatcher::new(config.email_sink_url.clone()));

        Ok(Self::with_parts(config.clone(), db_service.db, dispatcher))
    }

    /// 测试状态：内存数据库 + 记录型派发器
    pub async fn initialize_in_memory(config: &Config) -> Result<(Self, Arc<MemoryDispatcher>), AppError> {
        let db_service = DbService::open_in_memory().await?;
        let dispatcher = Arc::new(MemoryDispatcher::new());
        let state = Self::with_parts(config.clone(), db_service.db, dispatcher.clone());
        Ok((state, dispatcher))
    }

    fn with_parts(config: Config, db: Surreal<Db>, dispatcher: Arc<dyn EmailDispatcher>) -> Self {
        let (notify_service, notify_rx) = NotifyService::new(config.notify_queue_size);
        let notifier = notify_service.notifier();
        let engine = Arc::new(WorkflowEngine::new(
            db.clone(),
            notifier.clone(),
            config.admin_email.clone(),
        ));

        Self {
            config,
            db,
            engine,
            notifier,
            notify_rx: Arc::new(Mutex::new(Some(notify_rx))),
            dispatcher,
        }
    }

    /// 启动后台任务
    ///
    /// 必须在 `Server::run()` 之前调用。
    /// 启动的任务：通知派发 worker
    pub async fn start_background_tasks(&self) {
        let rx = self.notify_rx.lock().expect("notify_rx lock").take();
        let Some(rx) = rx else {
            tracing::warn!("Background tasks already started");
            return;
        };

        let dispatcher = self.dispatcher.clone();
        let logs = EmailLogRepository::new(self.db.clone());
        let max_attempts = self.config.notify_max_attempts;
        tokio::spawn(async move {
            NotifyService::run_worker(rx, dispatcher, logs, max_attempts).await;
        });
        tracing::info!("Notification worker started");
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
