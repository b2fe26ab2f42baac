mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::domain::Question;
use common::error::Error;
use common::llm::list_profiles;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::AskCommand;
use ports::inbound::UseCaseRunner;
use std::process;
use wiring::{wire_ask, App};

/// AskCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(&config);
        let command_name = cmd_name_for_log(&cmd);
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match cmd {
            AskCommand::Help => {
                print_help();
                Ok(0)
            }
            AskCommand::ListProfiles => self.list_profiles(),
            AskCommand::Query { question } => self.run_query(&config, question),
        };

        let code = result.as_ref().copied().unwrap_or_else(|e| e.exit_code());
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            self.log(
                LogRecord::new(LogLevel::Error, e.to_string())
                    .kind("error")
                    .field("error_kind", e.kind()),
            );
        }
        result
    }
}

impl Runner {
    fn run_query(&self, config: &Config, question: Option<Question>) -> Result<i32, Error> {
        // 設定不備は質問を読む前に中断する
        let executor = self.app.build_executor(config)?;
        let question = match question {
            Some(q) => q,
            None => self.app.question_reader.read_question()?,
        };
        if question.trim().is_empty() {
            return Err(Error::invalid_argument("No question provided."));
        }
        let outcome = executor.execute(&question)?;
        self.log(
            LogRecord::new(LogLevel::Info, "query finished")
                .kind("query")
                .field("profile", executor.config().profile_name.as_str())
                .field("warnings", outcome.warnings.len()),
        );
        Ok(0)
    }

    fn list_profiles(&self) -> Result<i32, Error> {
        let profiles = self.app.profiles()?;
        let (names, default) = list_profiles(profiles.as_ref());
        for name in &names {
            if *name == default {
                println!("{} (default)", name);
            } else {
                println!("{}", name);
            }
        }
        Ok(0)
    }

    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli"));
    }
}

fn cmd_name_for_log(cmd: &AskCommand) -> &'static str {
    match cmd {
        AskCommand::Help => "help",
        AskCommand::ListProfiles => "list-profiles",
        AskCommand::Query { .. } => "query",
    }
}

fn main() {
    // .env があれば読み込む（無ければ無視）
    dotenvy::dotenv().ok();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("ask: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let app = wire_ask(config.verbose);
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: ask [options] [question...]");
}

fn print_help() {
    println!("Usage: ask [options] [question...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -L, --list-profiles        List currently available provider profiles (from profiles.json + built-ins)");
    println!("  -p, --profile <profile>    Provider profile (openai, echo, or a name from profiles.json). Default: openai");
    println!("  -m, --model <model>        Model name. Default: profile model, then MODEL_NAME");
    println!("  --mode <mode>              strict-json (default) or freeform");
    println!("  --prompt-file <path>       Prompt template. Default: prompts/main_prompt.txt");
    println!("  --metrics-file <path>      Metrics CSV log. Default: metrics/metrics.csv");
    println!("  --unit-price <usd>         Cost per token in USD. Default: 0.000005");
    println!("  -v, --verbose              Mirror structured logs to stderr");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment (.env is loaded when present):");
    println!("  MODEL_NAME          Model for profiles without a fixed model");
    println!("  OPENAI_API_KEY      Credential for the openai profile");
    println!("  ASK_PROFILE         Profile when -p is not given");
    println!("  ASK_PROMPT_FILE, ASK_METRICS_FILE, ASK_RESPONSE_MODE, ASK_UNIT_PRICE");
    println!("  ASK_DENYLIST_EXTRA  Extra comma-separated denylist terms");
    println!("  ASK_HOME            Home directory. Profiles: $ASK_HOME/profiles.json; logs: $ASK_HOME/logs/ask.jsonl");
    println!("                      If unset, $XDG_CONFIG_HOME/ask (e.g. ~/.config/ask) is used.");
    println!();
    println!("Description:");
    println!("  Send one question to the LLM and print the answer as JSON, then the metrics table.");
    println!("  Questions containing a denylisted term are rejected before any network call.");
    println!("  If no question is given, it is read from standard input.");
    println!();
    println!("Examples:");
    println!("  ask How can I change my password?");
    println!("  ask -p alternate --mode freeform What is Rust?");
    println!("  ask --profile echo ping");
}
