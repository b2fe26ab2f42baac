use crate::domain::AskCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName, Question, ResponseMode};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -L / --list-profiles: 現在有効なプロファイル一覧を表示
    pub list_profiles: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// --mode: strict-json | freeform
    pub response_mode: Option<ResponseMode>,
    pub prompt_file: Option<PathBuf>,
    pub metrics_file: Option<PathBuf>,
    pub unit_price: Option<f64>,
    /// 質問（空白区切りの引数。結合して 1 つの質問にする）
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("ask")
        .about("Ask a hosted LLM a question, with a denylist pre-check and usage metrics")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("list-profiles")
                .short('L')
                .long("list-profiles")
                .help("List currently available provider profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror structured logs to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Provider profile (openai, echo, or a name from profiles.json)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (overrides MODEL_NAME and the profile)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("mode")
                .long("mode")
                .value_name("mode")
                .help("How to read the model output")
                .value_parser(["strict-json", "freeform"])
                .num_args(1),
        )
        .arg(
            clap::Arg::new("prompt-file")
                .long("prompt-file")
                .value_name("path")
                .help("Prompt template file (default: prompts/main_prompt.txt)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("metrics-file")
                .long("metrics-file")
                .value_name("path")
                .help("Metrics CSV log (default: metrics/metrics.csv)")
                .value_parser(value_parser!(PathBuf))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("unit-price")
                .long("unit-price")
                .value_name("usd")
                .help("Cost per token in USD (default: 0.000005)")
                .value_parser(value_parser!(f64))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("question")
                .index(1)
                .help("Question words (joined with spaces). Read from stdin when omitted")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        help: matches.get_flag("help"),
        list_profiles: matches.get_flag("list-profiles"),
        verbose: matches.get_flag("verbose"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        response_mode: matches
            .get_one::<String>("mode")
            .and_then(|s| ResponseMode::parse(s)),
        prompt_file: matches.get_one::<PathBuf>("prompt-file").cloned(),
        metrics_file: matches.get_one::<PathBuf>("metrics-file").cloned(),
        unit_price: matches.get_one::<f64>("unit-price").copied(),
        message_args: matches
            .get_many::<String>("question")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// Config を AskCommand に変換する（ディスパッチは main）
pub fn config_to_command(config: &Config) -> AskCommand {
    if config.help {
        return AskCommand::Help;
    }
    if config.list_profiles {
        return AskCommand::ListProfiles;
    }
    let question = if config.message_args.is_empty() {
        None
    } else {
        Some(Question::new(config.message_args.join(" ")))
    };
    AskCommand::Query { question }
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "ask", &mut std::io::stdout());
}
