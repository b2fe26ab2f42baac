//! クエリ実行ユースケース
//!
//! 安全フィルタ → リモート呼び出し（1 回・ブロッキング）→ 応答の解釈 → メトリクス算出
//! → メトリクスログ追記 → 表の表示。
//!
//! 拒否・失敗したクエリはメトリクスログに何も書かない。追記・表示の失敗は警告として
//! QueryOutcome.warnings に積み、結果は置き換えない。

use crate::domain::ExecutorConfig;
use crate::ports::outbound::{LlmCompletion, ResultPresenter};
use common::domain::query_result::ModelAnswer;
use common::domain::{Metrics, MetricsLogEntry, QueryResult, Question, ResponseMode};
use common::error::Error;
use common::metrics::MetricsRecorder;
use common::ports::outbound::{Clock, Log, LogLevel, LogRecord};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// QueryExecutor が使う外界（wiring が組み立てて渡す）
pub struct ExecutorDeps {
    pub completion: Arc<dyn LlmCompletion>,
    pub recorder: MetricsRecorder,
    pub clock: Arc<dyn Clock>,
    pub presenter: Arc<dyn ResultPresenter>,
    pub log: Arc<dyn Log>,
}

/// 1 クエリの結果と、結果を無効にしない失敗（PersistenceError）
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub result: QueryResult,
    pub warnings: Vec<Error>,
}

pub struct QueryExecutor {
    config: Arc<ExecutorConfig>,
    deps: ExecutorDeps,
}

impl QueryExecutor {
    pub fn new(config: Arc<ExecutorConfig>, deps: ExecutorDeps) -> Self {
        Self { config, deps }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// 質問を 1 件処理する。
    ///
    /// RemoteCall / ResponseFormat は Err で返し、ログ追記は行わない。
    pub fn execute(&self, question: &Question) -> Result<QueryOutcome, Error> {
        self.log(
            LogRecord::new(LogLevel::Info, "query started")
                .kind("query")
                .field("profile", self.config.profile_name.as_str())
                .field("mode", self.config.response_mode.as_str()),
        );

        if !self.config.safety.is_safe(question) {
            self.log(LogRecord::new(LogLevel::Warn, "unsafe prompt rejected").kind("query"));
            let result = QueryResult::unsafe_prompt();
            self.deps.presenter.show_result(&result);
            return Ok(QueryOutcome {
                result,
                warnings: Vec::new(),
            });
        }

        let (result, elapsed_ms) = self.answer(question).map_err(|e| {
            self.log(
                LogRecord::new(LogLevel::Error, "query failed")
                    .kind("error")
                    .field("error_kind", e.kind())
                    .field("error", e.to_string()),
            );
            e
        })?;

        let mut warnings = Vec::new();
        if let Some(metrics) = &result.metrics {
            let entry = MetricsLogEntry::measured(
                self.deps.clock.now_local_iso8601(),
                metrics.tokens,
                elapsed_ms,
                self.config.unit_price,
            );
            if let Err(e) = self.deps.recorder.append(&entry) {
                self.warn("metrics append failed", &e);
                warnings.push(e);
            }
        }

        self.deps.presenter.show_result(&result);

        match self.deps.recorder.render_table() {
            Ok(table) => self.deps.presenter.show_table(&table),
            Err(e) => {
                self.warn("metrics render failed", &e);
                warnings.push(e);
            }
        }

        Ok(QueryOutcome { result, warnings })
    }

    /// リモート呼び出しから QueryResult を組み立てる（副作用はログのみ）。
    /// 丸める前の経過時間（ms）も返す
    fn answer(&self, question: &Question) -> Result<(QueryResult, f64), Error> {
        let prompt = self.config.prompt_template.compose(question);

        let started = Instant::now();
        let completion = self.deps.completion.complete(&prompt)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let metrics = Metrics::compute(completion.usage, elapsed_ms, self.config.unit_price);
        self.log(
            LogRecord::new(LogLevel::Info, "remote call finished")
                .kind("query")
                .field("latency_ms", metrics.latency_ms)
                .field("prompt_tokens", metrics.tokens.prompt)
                .field("completion_tokens", metrics.tokens.completion)
                .field("total_tokens", metrics.tokens.total),
        );

        let answer = match self.config.response_mode {
            ResponseMode::StrictJson => parse_strict_json(&completion.text)?,
            ResponseMode::Freeform => ModelAnswer::freeform(completion.text),
        };
        Ok((QueryResult::answered(answer, metrics), elapsed_ms))
    }

    fn warn(&self, message: &str, error: &Error) {
        self.log(
            LogRecord::new(LogLevel::Warn, message)
                .kind("metrics")
                .field("path", self.config.metrics_path.display().to_string())
                .field("error", error.to_string()),
        );
        self.deps.presenter.warn(error);
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }
}

/// strict-json モード: モデル出力を answer / confidence / actions を持つ JSON として解釈する。
/// 前後の空白と ```json フェンスは取り除く。
pub fn parse_strict_json(text: &str) -> Result<ModelAnswer, Error> {
    let body = strip_code_fence(text.trim());
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::response_format(format!("Model output is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(Error::response_format(
            "Model output must be a JSON object with answer, confidence and actions",
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| Error::response_format(format!("Model output is missing required keys: {}", e)))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // 言語タグ（```json）は 1 行目ごと捨てる
    match inner.split_once('\n') {
        Some((_tag, body)) => body.trim(),
        None => inner.trim(),
    }
}
