/// 服务器配置 - 维修服务后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/fixpoint | 工作目录 (数据库、上传文件、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | EMAIL_SINK_URL | http://localhost:3002/send-email | 邮件发送服务地址 |
/// | ADMIN_EMAIL | admin@fixpoint.local | 后台通知收件地址 |
/// | NOTIFY_QUEUE_SIZE | 256 | 通知队列容量 |
/// | NOTIFY_MAX_ATTEMPTS | 3 | 通知重试次数上限 |
/// | UPLOAD_MAX_BYTES | 5242880 | 单个上传文件大小上限 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/fixpoint HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 邮件发送服务 (外部协作方) 地址
    pub email_sink_url: String,
    /// 后台通知收件地址
    pub admin_email: String,
    /// 通知队列容量
    pub notify_queue_size: usize,
    /// 通知重试次数上限
    pub notify_max_attempts: u32,
    /// 单个上传文件大小上限 (字节)
    pub upload_max_bytes: usize,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/fixpoint".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            email_sink_url: std::env::var("EMAIL_SINK_URL")
                .unwrap_or_else(|_| "http://localhost:3002/send-email".into()),
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@fixpoint.local".into()),
            notify_queue_size: std::env::var("NOTIFY_QUEUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            notify_max_attempts: std::env::var("NOTIFY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            upload_max_bytes: std::env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// 上传文件目录
    pub fn uploads_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("uploads")
    }

    /// 数据库目录
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.work_dir).join("data")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
