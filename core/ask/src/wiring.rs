//! 配線: 標準アダプタで App と QueryExecutor を組み立てる

use std::sync::Arc;

use common::adapter::{
    CompositeLog, EnvResolver, FileJsonLog, FileSystem, Log, NoopLog, StdClock, StdEnvResolver,
    StdFileSystem, StderrLog,
};
use common::error::Error;
use common::llm::config::ProfilesConfig;
use common::llm::{create_provider, load_profiles_config};
use common::metrics::MetricsRecorder;
use common::ports::outbound::{LogLevel, LogRecord};
use common::prompt_template::PromptTemplate;
use common::safety::SafetyFilter;

use crate::adapter::{ConsolePresenter, DriverLlmCompletion, StdinQuestionReader};
use crate::cli::Config;
use crate::domain::ExecutorConfig;
use crate::ports::outbound::{QuestionReader, ResultPresenter};
use crate::usecase::{resolve_settings, ExecutorDeps, QueryExecutor};

/// main が使う依存の束
pub struct App {
    pub env_resolver: Arc<dyn EnvResolver>,
    pub fs: Arc<dyn FileSystem>,
    pub logger: Arc<dyn Log>,
    pub presenter: Arc<dyn ResultPresenter>,
    pub question_reader: Arc<dyn QuestionReader>,
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_ask(verbose: bool) -> App {
    wire_ask_with(verbose, Arc::new(StdEnvResolver))
}

/// 環境変数の解決だけ差し替えて App を組み立てる（テスト用の入口も兼ねる）
pub fn wire_ask_with(verbose: bool, env_resolver: Arc<dyn EnvResolver>) -> App {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger = build_logger(env_resolver.as_ref(), Arc::clone(&fs), verbose);
    App {
        env_resolver,
        fs,
        logger,
        presenter: Arc::new(ConsolePresenter),
        question_reader: Arc::new(StdinQuestionReader),
    }
}

/// ログ出力先: ホームが解決できればファイル、できなければ Noop。-v なら stderr にも出す
fn build_logger(env: &dyn EnvResolver, fs: Arc<dyn FileSystem>, verbose: bool) -> Arc<dyn Log> {
    let base: Arc<dyn Log> = match env.resolve_log_file_path() {
        Ok(path) => Arc::new(FileJsonLog::new(fs, path)),
        Err(_) => Arc::new(NoopLog),
    };
    if verbose {
        Arc::new(CompositeLog::new(vec![base, Arc::new(StderrLog)]))
    } else {
        base
    }
}

impl App {
    /// profiles.json を読む（無ければ None）
    pub fn profiles(&self) -> Result<Option<ProfilesConfig>, Error> {
        load_profiles_config(self.fs.as_ref(), self.env_resolver.as_ref())
    }

    /// 設定を解決して QueryExecutor を組み立てる。
    /// 設定不備（テンプレート・モデル・認証情報）はここで Error::Configuration になり、クエリは走らない。
    pub fn build_executor(&self, config: &Config) -> Result<QueryExecutor, Error> {
        let profiles = self.profiles()?;
        let settings = resolve_settings(config, self.env_resolver.as_ref(), profiles.as_ref())?;
        let prompt_template = PromptTemplate::load(self.fs.as_ref(), &settings.prompt_path)?;

        let provider = create_provider(
            &settings.provider.profile_name,
            settings.provider.provider_type,
            settings.model.clone(),
            settings.provider.base_url.clone(),
            settings.api_key.clone(),
            settings.provider.temperature,
        )?;

        let _ = self.logger.log(
            &LogRecord::new(LogLevel::Info, "executor configured")
                .layer("wiring")
                .kind("config")
                .field("profile", settings.provider.profile_name.as_str())
                .field("provider_type", settings.provider.provider_type.as_str())
                .field("model", settings.model.clone().unwrap_or_default())
                .field("mode", settings.response_mode.as_str())
                .field("unit_price", settings.unit_price)
                .field("metrics_path", settings.metrics_path.display().to_string()),
        );

        let executor_config = ExecutorConfig {
            profile_name: settings.provider.profile_name.clone(),
            response_mode: settings.response_mode,
            unit_price: settings.unit_price,
            prompt_template,
            metrics_path: settings.metrics_path.clone(),
            safety: SafetyFilter::with_extra(&settings.extra_denylist),
        };
        let deps = ExecutorDeps {
            completion: Arc::new(DriverLlmCompletion::new(provider)),
            recorder: MetricsRecorder::new(Arc::clone(&self.fs), &executor_config.metrics_path),
            clock: Arc::new(StdClock),
            presenter: Arc::clone(&self.presenter),
            log: Arc::clone(&self.logger),
        };
        Ok(QueryExecutor::new(Arc::new(executor_config), deps))
    }
}
